use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};

use log::error;

pub type KeyValues = HashMap<String, String>;

/// Parse `key: value` lines. Every key in `keys` must be present.
pub fn read(input: impl Read, keys: &[&str]) -> Result<KeyValues, ()> {
    let mut kv = HashMap::new();

    for line in BufReader::new(input).lines() {
        let line = line.map_err(|e| {
            error!("couldn't read line: {e}");
        })?;

        if line.is_empty() {
            continue;
        }

        let (k, v) = line.split_once(':').ok_or_else(|| {
            error!("invalid line, can't split");
        })?;

        let Some(v) = v.strip_prefix(' ') else {
            error!("invalid line - no whitespace after colon");
            return Err(());
        };

        kv.insert(k.into(), v.into());
    }

    if let Some(missing) = keys.iter().find(|k| !kv.contains_key(**k)) {
        error!("missing key \"{missing}\"");
        return Err(());
    }

    Ok(kv)
}
