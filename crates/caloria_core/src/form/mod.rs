//! Create-entry form: input state machine and submission validation.
//!
//! # Responsibility
//! - Collect `FoodFormData` while the form is open.
//! - Validate at submission and hand valid data to the store.
//!
//! # Invariants
//! - Lifecycle is `Closed -> Open -> Closed`, either saved or cancelled.
//! - Validation runs only on submit; a failed submit never touches the store.

pub mod food_form;
pub mod validation;
