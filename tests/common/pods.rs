//! Pod fixtures

use solid_populate::{MemoryGraph, NodeRef, Term, Vocabulary};

pub const ALICE: &str = "https://alice.example/profile/card#me";
pub const TYPE_INDEX: &str = "https://alice.example/settings/publicTypeIndex.ttl";
pub const RECIPES: &str = "https://alice.example/recipes/";

pub const R1: &str = "https://alice.example/recipes/soup#it";
pub const R2: &str = "https://alice.example/recipes/salad#it";

/// Alice's pod: a profile with a name, a public type index registering
/// `Recipe` at `RECIPES`, and two recipes titled via `pred:title`.
pub fn recipe_pod() -> MemoryGraph {
    let vocab = Vocabulary::default();
    let graph = MemoryGraph::new();

    graph.insert(ALICE, "http://xmlns.com/foaf/0.1/name", Term::string("Alice"));
    graph.insert(ALICE, vocab.public_type_index.clone(), Term::node(TYPE_INDEX));

    let registration = format!("{}#recipes", TYPE_INDEX);
    graph.add_member(TYPE_INDEX, registration.as_str());
    graph.insert(registration.as_str(), vocab.for_class.clone(), Term::node("Recipe"));
    graph.insert(registration.as_str(), vocab.instance.clone(), Term::node(RECIPES));

    graph.add_member(RECIPES, R1);
    graph.add_member(RECIPES, R2);
    graph.insert(R1, "pred:title", Term::string("Soup"));
    graph.insert(R2, "pred:title", Term::string("Salad"));

    graph.set_principal(Some(NodeRef::new(ALICE)));
    graph
}
