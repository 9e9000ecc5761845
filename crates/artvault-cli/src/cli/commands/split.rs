//! `artvault split <list>` – print the parsed URL list.

use anyhow::Result;
use artvault_core::url_model::parse_batch;

pub fn run_split(input: &str) -> Result<()> {
    for url in parse_batch(input)? {
        println!("{url}");
    }
    Ok(())
}
