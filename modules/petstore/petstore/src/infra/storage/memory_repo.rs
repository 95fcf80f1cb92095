//! In-memory repository backed by a single mutex.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use petstore_sdk::{Pet, PetId};

use crate::domain::repo::PetsRepository;

#[derive(Default)]
struct State {
    /// Ids are handed out in increasing order, so key order is insertion order.
    pets: BTreeMap<PetId, Pet>,
    last_id: PetId,
}

/// In-memory pet storage.
///
/// The map and the id counter share one lock: assigning an id and storing the
/// pet happen in the same critical section.
#[derive(Default)]
pub struct InMemoryPetsRepository {
    state: Mutex<State>,
}

impl InMemoryPetsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `pets`; the counter starts at their highest id.
    #[must_use]
    pub fn with_pets(pets: impl IntoIterator<Item = Pet>) -> Self {
        let pets: BTreeMap<PetId, Pet> = pets.into_iter().map(|p| (p.id, p)).collect();
        let last_id = pets.keys().next_back().copied().unwrap_or_default();
        Self {
            state: Mutex::new(State { pets, last_id }),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().pets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PetsRepository for InMemoryPetsRepository {
    fn list(&self) -> Vec<Pet> {
        self.state.lock().pets.values().cloned().collect()
    }

    fn insert(&self, name: String, tag: Option<String>) -> Pet {
        let mut state = self.state.lock();
        state.last_id += 1;
        let pet = Pet {
            id: state.last_id,
            name,
            tag,
        };
        state.pets.insert(pet.id, pet.clone());
        pet
    }

    fn get(&self, id: PetId) -> Option<Pet> {
        self.state.lock().pets.get(&id).cloned()
    }

    fn last_id(&self) -> PetId {
        self.state.lock().last_id
    }
}
