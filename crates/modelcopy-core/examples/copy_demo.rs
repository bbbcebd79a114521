//! Copy API Demonstration
//!
//! Builds a small model, copies a definition with its usages, links the
//! copy into another definition and threads the snapshot through `apply`.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use modelcopy_core::copy::{copy_change_set, CopyOptions, PublishedValuePolicy};
use modelcopy_core::model::{fresh_id, ClassKind, EntityRef, ValueSetValues};
use modelcopy_core::{apply, SnapshotBuilder, UsageLinkRequest};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== ModelCopy Demo ===\n");

    let power = EntityRef::new(fresh_id(), ClassKind::DomainOfExpertise);
    let thermal = EntityRef::new(fresh_id(), ClassKind::DomainOfExpertise);
    let mut b = SnapshotBuilder::new(fresh_id());

    let satellite = b.element_definition("Satellite", "SAT", power)?;
    let battery = b.element_definition("Battery", "BAT", power)?;
    let capacity = b.parameter(battery, power, fresh_id())?;
    let capacity_vs = b.value_set(capacity, ValueSetValues::default())?;
    let watch = b.subscription(capacity, thermal)?;
    b.subscription_value_set(watch, capacity_vs)?;
    let cell = b.element_definition("Cell", "CEL", power)?;
    b.element_usage(battery, cell, power)?;

    let state = b.build();
    println!("Snapshot holds {} nodes", state.len());

    // ===== Copy =====
    let options = CopyOptions {
        published_values: PublishedValuePolicy::Reset,
        ..CopyOptions::with_usages()
    };
    let copy = copy_change_set(&state, Some(battery), &options)?;
    for entry in &copy {
        println!("  create {:<30} {}", entry.kind(), entry.id());
    }
    let copied = copy.entries()[0].id();
    let state = apply(state, &copy)?;
    println!("✓ Copied Battery as {} ({} entries)\n", copied, copy.len());

    // ===== Link =====
    let link = {
        let container = state.element_definition(&satellite)?;
        let target = state.element_definition(&copied)?;
        UsageLinkRequest::new(Some(container), Some(target), Some(&power))?.build()?
    };
    let state = apply(state, &link)?;
    println!("✓ Satellite now uses the copy");

    println!("\nSnapshot holds {} nodes", state.len());
    Ok(())
}
