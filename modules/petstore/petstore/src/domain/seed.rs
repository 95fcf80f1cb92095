//! Pets the store holds when it starts.

use petstore_sdk::Pet;

#[must_use]
pub fn initial_pets() -> Vec<Pet> {
    vec![
        Pet {
            id: 1,
            name: "Barnaby".to_owned(),
            tag: Some("Vicious".to_owned()),
        },
        Pet {
            id: 2,
            name: "Colin".to_owned(),
            tag: Some("Accountant".to_owned()),
        },
    ]
}
