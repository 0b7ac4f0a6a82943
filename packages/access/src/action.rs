// ABOUTME: Action classes checked by the permission evaluator
// ABOUTME: list/retrieve map to Read, create to Create, update/partial-update/destroy to Mutate

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    Create,
    Mutate,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Read => write!(f, "read"),
            Action::Create => write!(f, "create"),
            Action::Mutate => write!(f, "mutate"),
        }
    }
}
