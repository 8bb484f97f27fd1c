/// Bitset used for possibility and rule sets
pub mod bitset;
/// Collapse engine driving select, commit and propagate
pub mod executor;
/// Neighbour filtering after a commit
pub mod propagation;
/// Cell selection and tile draws
pub mod selection;
