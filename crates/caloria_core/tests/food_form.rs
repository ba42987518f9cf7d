use caloria_core::form::validation::{CALORIES_NOT_POSITIVE, NAME_REQUIRED, QUANTITY_REQUIRED};
use caloria_core::{
    FoodForm, FoodStore, FormError, FormField, FormState, ManualClock, MemoryKeyValueStorage,
    SubmitOutcome,
};
use chrono::{FixedOffset, TimeZone, Utc};

fn clock() -> ManualClock {
    ManualClock::new(
        Utc.with_ymd_and_hms(2026, 10, 17, 11, 5, 0).unwrap(),
        FixedOffset::east_opt(2 * 3600).unwrap(),
    )
}

#[test]
fn open_initializes_empty_fields_and_local_default_time() {
    let clock = clock();
    let mut form = FoodForm::new(&clock);
    form.open();

    assert_eq!(form.state(), FormState::Open);
    assert_eq!(form.data().name, "");
    assert_eq!(form.data().quantity, "");
    assert_eq!(form.data().calories, 0);
    assert_eq!(form.data().time, "13:05");
    assert!(form.errors().is_empty());
}

#[test]
fn valid_submit_adds_record_resets_and_closes() {
    let clock = clock();
    let storage = MemoryKeyValueStorage::new();
    let mut store = FoodStore::open(&storage, &clock);
    let mut form = FoodForm::new(&clock);

    form.open();
    form.set_name("Pollo").unwrap();
    form.set_quantity("200g").unwrap();
    form.set_calories_text("250").unwrap();
    form.set_time("08:30").unwrap();

    clock.set(Utc.with_ymd_and_hms(2026, 10, 17, 11, 9, 0).unwrap());
    let outcome = form.submit(&mut store).unwrap();

    let SubmitOutcome::Saved(record) = outcome else {
        panic!("expected saved outcome");
    };
    assert_eq!(record.name, "Pollo");
    assert_eq!(record.time, "08:30");
    assert_eq!(store.total_calories(), 250);
    assert_eq!(form.state(), FormState::Closed);
    assert_eq!(form.data().name, "");
    assert_eq!(form.data().time, "13:09");
}

#[test]
fn empty_submit_reports_all_required_fields_without_mutation() {
    let clock = clock();
    let storage = MemoryKeyValueStorage::new();
    let mut store = FoodStore::open(&storage, &clock);
    let mut form = FoodForm::new(&clock);
    form.open();
    form.set_name("   ").unwrap();

    let outcome = form.submit(&mut store).unwrap();

    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected invalid outcome");
    };
    assert_eq!(
        errors.fields(),
        vec![FormField::Name, FormField::Quantity, FormField::Calories]
    );
    assert_eq!(errors.get(FormField::Name), Some(NAME_REQUIRED));
    assert_eq!(errors.get(FormField::Quantity), Some(QUANTITY_REQUIRED));
    assert_eq!(errors.get(FormField::Calories), Some(CALORIES_NOT_POSITIVE));
    assert!(store.foods().is_empty());
    assert!(storage.is_empty());
    assert!(form.is_open());
    assert_eq!(form.errors(), &errors);
}

#[test]
fn each_invalid_field_reports_exactly_its_own_error() {
    let clock = clock();
    let storage = MemoryKeyValueStorage::new();
    let mut store = FoodStore::open(&storage, &clock);
    let cases: &[(&str, &str, &str, FormField)] = &[
        ("", "1", "100", FormField::Name),
        ("Pan", " ", "100", FormField::Quantity),
        ("Pan", "1", "0", FormField::Calories),
        ("Pan", "1", "-20", FormField::Calories),
        ("Pan", "1", "doscientas", FormField::Calories),
    ];

    for (name, quantity, calories, failing) in cases {
        let mut form = FoodForm::new(&clock);
        form.open();
        form.set_field(FormField::Name, name).unwrap();
        form.set_field(FormField::Quantity, quantity).unwrap();
        form.set_field(FormField::Calories, calories).unwrap();

        let SubmitOutcome::Invalid(errors) = form.submit(&mut store).unwrap() else {
            panic!("expected invalid outcome for {name:?}/{quantity:?}/{calories:?}");
        };
        assert_eq!(errors.fields(), vec![*failing]);
    }
    assert!(store.foods().is_empty());
}

#[test]
fn editing_a_field_clears_only_its_error() {
    let clock = clock();
    let storage = MemoryKeyValueStorage::new();
    let mut store = FoodStore::open(&storage, &clock);
    let mut form = FoodForm::new(&clock);
    form.open();
    form.submit(&mut store).unwrap();
    assert_eq!(form.errors().len(), 3);

    form.set_name("Manzana").unwrap();

    assert!(!form.errors().contains(FormField::Name));
    assert!(form.errors().contains(FormField::Quantity));
    assert!(form.errors().contains(FormField::Calories));
}

#[test]
fn resubmit_after_fixing_errors_saves() {
    let clock = clock();
    let storage = MemoryKeyValueStorage::new();
    let mut store = FoodStore::open(&storage, &clock);
    let mut form = FoodForm::new(&clock);
    form.open();
    form.set_name("Manzana").unwrap();
    assert!(matches!(
        form.submit(&mut store).unwrap(),
        SubmitOutcome::Invalid(_)
    ));

    form.set_quantity("1 unidad").unwrap();
    form.set_calories(95).unwrap();

    assert!(matches!(
        form.submit(&mut store).unwrap(),
        SubmitOutcome::Saved(_)
    ));
    assert_eq!(store.total_calories(), 95);
}

#[test]
fn cancel_discards_input_without_touching_store() {
    let clock = clock();
    let storage = MemoryKeyValueStorage::new();
    let store = FoodStore::open(&storage, &clock);
    let mut form = FoodForm::new(&clock);
    form.open();
    form.set_name("Helado").unwrap();

    form.cancel().unwrap();

    assert_eq!(form.state(), FormState::Closed);
    assert_eq!(form.data().name, "");
    assert!(store.foods().is_empty());
    assert!(storage.is_empty());
}

#[test]
fn closed_form_rejects_submit() {
    let clock = clock();
    let storage = MemoryKeyValueStorage::new();
    let mut store = FoodStore::open(&storage, &clock);
    let mut form = FoodForm::new(&clock);

    assert_eq!(form.submit(&mut store).unwrap_err(), FormError::NotOpen);
}

#[test]
fn empty_time_is_accepted() {
    let clock = clock();
    let storage = MemoryKeyValueStorage::new();
    let mut store = FoodStore::open(&storage, &clock);
    let mut form = FoodForm::new(&clock);
    form.open();
    form.set_name("Té").unwrap();
    form.set_quantity("1 taza").unwrap();
    form.set_calories(2).unwrap();
    form.set_time("").unwrap();

    let SubmitOutcome::Saved(record) = form.submit(&mut store).unwrap() else {
        panic!("expected saved outcome");
    };
    assert_eq!(record.time, "");
}

#[test]
fn calories_in_other_digit_scripts_are_rejected() {
    let clock = clock();
    let storage = MemoryKeyValueStorage::new();
    let mut store = FoodStore::open(&storage, &clock);
    let mut form = FoodForm::new(&clock);
    form.open();
    form.set_name("Arroz").unwrap();
    form.set_quantity("1 taza").unwrap();
    form.set_calories_text("٢٥٠").unwrap();

    assert_eq!(form.data().calories, 0);
    let SubmitOutcome::Invalid(errors) = form.submit(&mut store).unwrap() else {
        panic!("expected invalid outcome");
    };
    assert_eq!(errors.fields(), vec![FormField::Calories]);
    assert!(store.foods().is_empty());
    assert!(storage.is_empty());
}
