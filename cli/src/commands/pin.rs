use anyhow::Result;

use bulk_core::models::TrackerData;
use bulk_core::store::Store;
use bulk_core::validate;

use crate::pin::hash_pin;

use super::helpers::confirm;

pub(crate) fn cmd_pin_set(store: &Store, data: &mut TrackerData, pin: &str) -> Result<()> {
    let pin = validate::pin(pin)?;
    data.user_settings.pin_hash = Some(hash_pin(pin));
    store.save(data)?;

    println!("PIN set. You will be asked for it on every run.");
    Ok(())
}

pub(crate) fn cmd_pin_clear(store: &Store, data: &mut TrackerData, yes: bool) -> Result<()> {
    if data.user_settings.pin_hash.is_none() {
        eprintln!("No PIN is set.");
        return Ok(());
    }
    if !yes && !confirm("Remove PIN protection?")? {
        eprintln!("PIN kept");
        return Ok(());
    }

    data.user_settings.pin_hash = None;
    store.save(data)?;

    println!("PIN protection removed.");
    Ok(())
}
