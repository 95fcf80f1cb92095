//! Repository trait for pet storage.

use petstore_sdk::{Pet, PetId};

/// Storage interface used by the domain service.
///
/// Implementations own identifier assignment: `insert` must hand out the next
/// id and store the pet atomically, so concurrent inserts never share an id.
pub trait PetsRepository: Send + Sync {
    /// All pets in insertion order.
    fn list(&self) -> Vec<Pet>;

    /// Assign the next identifier, store the pet and return it.
    fn insert(&self, name: String, tag: Option<String>) -> Pet;

    /// Look up a pet by identifier.
    fn get(&self, id: PetId) -> Option<Pet>;

    /// Highest identifier handed out so far.
    fn last_id(&self) -> PetId;
}
