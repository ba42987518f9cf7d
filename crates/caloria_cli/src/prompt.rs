//! Terminal driver for the create-entry form.
//!
//! Flags fill fields up front; on a terminal, missing or invalid fields are
//! asked for until the form saves or the user declines to save.

use crate::AddArgs;
use anyhow::{bail, Result};
use caloria_core::{
    Clock, FieldErrors, FoodForm, FoodStore, FormField, KeyValueStorage, SubmitOutcome,
};
use dialoguer::{Confirm, Input};

/// Runs one open/submit cycle. Returns `true` when an entry was saved.
pub(crate) fn run_add_form<S, C>(
    store: &mut FoodStore<S, C>,
    clock: C,
    args: &AddArgs,
    interactive: bool,
) -> Result<bool>
where
    S: KeyValueStorage,
    C: Clock,
{
    let mut form = FoodForm::new(clock);
    form.open();
    apply_flags(&mut form, args)?;

    if interactive {
        let missing: Vec<FormField> = FormField::ALL
            .into_iter()
            .filter(|field| flag_for(args, *field).is_none())
            .collect();
        for field in missing {
            ask_field(&mut form, field)?;
        }
    }

    loop {
        if interactive && !args.yes {
            let save = Confirm::new()
                .with_prompt("¿Guardar alimento?")
                .default(true)
                .interact()?;
            if !save {
                form.cancel()?;
                println!("Cancelado");
                return Ok(false);
            }
        }

        match form.submit(store)? {
            SubmitOutcome::Saved(record) => {
                println!("Guardado {}", record.id);
                println!();
                return Ok(true);
            }
            SubmitOutcome::Invalid(errors) => {
                print_errors(&errors);
                if !interactive {
                    bail!("food entry not saved: {} invalid field(s)", errors.len());
                }
                for (field, _) in errors.iter() {
                    ask_field(&mut form, field)?;
                }
            }
        }
    }
}

fn apply_flags<C: Clock>(form: &mut FoodForm<C>, args: &AddArgs) -> Result<()> {
    for field in FormField::ALL {
        if let Some(value) = flag_for(args, field) {
            form.set_field(field, value)?;
        }
    }
    Ok(())
}

fn flag_for(args: &AddArgs, field: FormField) -> Option<&str> {
    match field {
        FormField::Name => args.name.as_deref(),
        FormField::Quantity => args.quantity.as_deref(),
        FormField::Calories => args.calories.as_deref(),
        FormField::Time => args.time.as_deref(),
    }
}

fn ask_field<C: Clock>(form: &mut FoodForm<C>, field: FormField) -> Result<()> {
    let (label, current) = match field {
        FormField::Name => ("Nombre del alimento", form.data().name.clone()),
        FormField::Quantity => ("Cantidad", form.data().quantity.clone()),
        FormField::Calories => ("Calorias", form.calories_display()),
        FormField::Time => ("Hora", form.data().time.clone()),
    };
    let value: String = Input::new()
        .with_prompt(label)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    form.set_field(field, &value)?;
    Ok(())
}

fn print_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("  {}: {}", field.as_str(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::run_add_form;
    use crate::AddArgs;
    use caloria_core::{FoodStore, ManualClock, MemoryKeyValueStorage};
    use chrono::{TimeZone, Utc};

    fn clock() -> ManualClock {
        ManualClock::utc(Utc.with_ymd_and_hms(2026, 10, 17, 9, 15, 0).unwrap())
    }

    #[test]
    fn non_interactive_add_saves_from_flags_with_default_time() {
        let clock = clock();
        let storage = MemoryKeyValueStorage::new();
        let mut store = FoodStore::open(&storage, &clock);
        let args = AddArgs {
            name: Some("Pollo".to_string()),
            quantity: Some("200g".to_string()),
            calories: Some("250".to_string()),
            ..AddArgs::default()
        };

        assert!(run_add_form(&mut store, &clock, &args, false).unwrap());
        assert_eq!(store.total_calories(), 250);
        assert_eq!(store.foods()[0].time, "09:15");
    }

    #[test]
    fn non_interactive_add_with_invalid_flags_fails_without_saving() {
        let clock = clock();
        let storage = MemoryKeyValueStorage::new();
        let mut store = FoodStore::open(&storage, &clock);
        let args = AddArgs {
            name: Some("Pollo".to_string()),
            calories: Some("mucho".to_string()),
            ..AddArgs::default()
        };

        let err = run_add_form(&mut store, &clock, &args, false).unwrap_err();
        assert!(err.to_string().contains("2 invalid field(s)"));
        assert!(store.foods().is_empty());
    }
}
