//! Read-only views over the dataset.
//!
//! `stats` prints raw `key=value` totals first (stable for scripts), then the
//! formatted forms. `list` is for humans.

use anyhow::Result;
use brc_aggregate::format::{format_currency, format_rate};
use brc_aggregate::{global_metrics, price_of, rank_owners, summarize_owner};

use super::Workspace;

pub fn stats(ws: &Workspace) -> Result<()> {
    let session = ws.open_session()?;
    let m = global_metrics(session.dataset(), &ws.prices);

    println!(
        "owners={} entities={} total_value={} total_generation={}",
        m.owner_count, m.entity_count, m.total_value, m.total_generation
    );
    println!("total_value_fmt={}", format_currency(m.total_value));
    println!("total_generation_fmt={}", format_rate(m.total_generation));
    if let Some(d) = session.dataset() {
        println!("last_update={}", d.last_update());
    }
    Ok(())
}

pub fn list(ws: &Workspace, with_entities: bool) -> Result<()> {
    let session = ws.open_session()?;
    let ranked = rank_owners(session.dataset());
    if ranked.is_empty() {
        println!("owners=0");
        return Ok(());
    }

    for (i, owner) in ranked.into_iter().enumerate() {
        let s = summarize_owner(owner, &ws.prices);
        println!(
            "{}. {} ({})  entities={}  value={}  generation={}",
            i + 1,
            s.display_name,
            s.owner_id,
            s.entity_count,
            format_currency(s.value),
            format_rate(s.generation)
        );

        if !with_entities {
            continue;
        }
        for e in &owner.entities {
            let mutation = if e.has_mutation() { e.mutation.as_str() } else { "-" };
            println!(
                "    - {} [{}] mutation={}  generation={}  price={}",
                e.name,
                e.rarity,
                mutation,
                format_rate(e.generation),
                format_currency(price_of(&e.name, &ws.prices))
            );
        }
    }
    Ok(())
}
