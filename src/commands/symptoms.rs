use chrono::Utc;
use log::info;

use crate::{
    models::{today, SymptomEntry, SymptomForm},
    AppState,
};

/// Saves the current selections and clears the form once the write lands.
/// On failure the form keeps its selections so the user can retry.
pub async fn save_symptoms(
    state: &AppState,
    form: &mut SymptomForm,
) -> Result<SymptomEntry, String> {
    let entry = form.to_entry(Utc::now());

    state
        .store
        .append(vec![entry.clone()])
        .await
        .map_err(|e| e.to_string())?;

    form.clear();
    info!("Logged symptoms: {}", entry.describe());
    Ok(entry)
}

pub async fn get_today_symptoms(state: &AppState) -> Result<Vec<SymptomEntry>, String> {
    let symptoms = state
        .store
        .read::<SymptomEntry>()
        .await
        .map_err(|e| e.to_string())?;
    let today = today();
    Ok(symptoms
        .into_iter()
        .rev()
        .filter(|s| s.date == today)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{store::Collection, test_support::open_state};

    #[tokio::test]
    async fn saving_clears_the_form() {
        let (_dir, state) = open_state();
        let mut form = SymptomForm::new();
        form.select("palpitations", 4);
        form.set_notes("after shower");

        let entry = save_symptoms(&state, &mut form).await.unwrap();
        assert_eq!(entry.symptoms.get("palpitations"), Some(&4));
        assert_eq!(form, SymptomForm::new());

        let today = get_today_symptoms(&state).await.unwrap();
        assert_eq!(today, vec![entry]);
    }

    #[tokio::test]
    async fn failed_save_keeps_the_selections() {
        let (_dir, state) = open_state();
        // Corrupt the stored collection behind the store's back.
        let db = crate::db::Database::new(state.data_dir().join("pots-tracker.sqlite3")).unwrap();
        db.put_record(Collection::Symptoms.key(), "oops".into())
            .await
            .unwrap();

        let mut form = SymptomForm::new();
        form.select("nausea", 2);
        let err = save_symptoms(&state, &mut form).await.unwrap_err();
        assert!(err.contains("corrupt"));
        assert_eq!(form.selections().get("nausea"), Some(&2));
    }
}
