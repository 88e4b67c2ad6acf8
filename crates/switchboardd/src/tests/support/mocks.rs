//! mockall doubles for the collaborators that load after startup.

use mockall::mock;
use serde_json::Value;

use crate::collaborators::{CitationEngine, Dictionary};

mock! {
    pub Dict {}
    impl Dictionary for Dict {
        fn check(&self, term: &str) -> bool;
        fn suggest(&self, term: &str) -> Vec<String>;
    }
}

mock! {
    pub Engine {}
    impl CitationEngine for Engine {
        fn citation(&mut self, ids: &[String]) -> Value;
        fn update_items(&mut self, ids: &[String]) -> Value;
    }
}
