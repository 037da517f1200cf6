//! Study set listing command handlers.

use deckport::config::DeckportConfig;
use deckport::storage::{SqliteStudySetStore, StudySetStore};
use deckport::{Error, Result, StudySetId, UserId};

/// Lists the study sets owned by `owner`.
pub fn cmd_sets(config: &DeckportConfig, owner: &str, json: bool) -> Result<()> {
    let store = SqliteStudySetStore::new(config.database_path())?;
    let sets = store.list_study_sets(&UserId::new(owner))?;

    if json {
        let output =
            serde_json::to_string_pretty(&sets).map_err(|e| Error::operation("serialize_output", e))?;
        println!("{output}");
        return Ok(());
    }

    if sets.is_empty() {
        println!("No study sets for '{owner}'.");
        return Ok(());
    }

    println!("{} study set(s):", sets.len());
    for set in &sets {
        println!("  {}  {}", set.id, set.title);
    }
    Ok(())
}

/// Prints a study set and its terms.
pub fn cmd_show(config: &DeckportConfig, set_id: &str, json: bool) -> Result<()> {
    let store = SqliteStudySetStore::new(config.database_path())?;
    let id = StudySetId::new(set_id);
    let set = store
        .get_study_set(&id)?
        .ok_or_else(|| Error::InvalidInput(format!("study set '{set_id}' not found")))?;
    let terms = store.list_terms(&id)?;

    if json {
        let value = serde_json::json!({ "study_set": set, "terms": terms });
        let output = serde_json::to_string_pretty(&value)
            .map_err(|e| Error::operation("serialize_output", e))?;
        println!("{output}");
        return Ok(());
    }

    println!("{}", set.title);
    println!("  ID:          {}", set.id);
    println!("  Owner:       {}", set.owner_id);
    println!("  Description: {}", set.description);
    println!("  Terms:       {}", terms.len());
    println!();
    for term in &terms {
        println!("  {}\t{}", term.word, term.definition);
    }
    Ok(())
}
