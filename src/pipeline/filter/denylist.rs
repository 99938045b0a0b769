//! Resolution-text denylist.
//!
//! Boilerplate, deflection, and non-actionable phrases that mark a ticket
//! resolution as worthless for a knowledge base. Matching is
//! case-insensitive substring; the first hit rejects the record.

/// Curated phrases from PA help-desk resolution texts.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "attendere",
    "in attesa di riscontro",
    "inoltrato al fornitore",
    "inoltrata al fornitore",
    "escalation al secondo livello",
    "non esiste una tempistica standard",
    "si rimanda al manuale",
    "ticket chiuso per inattività",
    "nessuna risposta dall'utente",
    "chiuso senza risoluzione",
    "segnalazione duplicata",
    "si prega di aprire un nuovo ticket",
    "presa in carico",
];

/// First denylist phrase contained in `text`, if any.
pub fn denylist_match<'a>(text: &str, denylist: &'a [String]) -> Option<&'a str> {
    let lower = text.to_lowercase();
    denylist
        .iter()
        .find(|phrase| lower.contains(&phrase.to_lowercase()))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denylist() -> Vec<String> {
        DEFAULT_DENYLIST.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn matching_is_case_insensitive() {
        let denylist = denylist();
        let hit = denylist_match("ATTENDERE il prossimo aggiornamento", &denylist);
        assert_eq!(hit, Some("attendere"));
    }

    #[test]
    fn substring_match_inside_longer_text() {
        let denylist = denylist();
        let hit = denylist_match(
            "La segnalazione è stata inoltrata al fornitore per analisi.",
            &denylist,
        );
        assert_eq!(hit, Some("inoltrata al fornitore"));
    }

    #[test]
    fn first_match_wins() {
        // Text contains two denylisted phrases; the earlier list entry is
        // the one reported.
        let denylist = denylist();
        let hit = denylist_match(
            "attendere, la pratica è stata presa in carico",
            &denylist,
        );
        assert_eq!(hit, Some("attendere"));
    }

    #[test]
    fn clean_text_does_not_match() {
        let denylist = denylist();
        let hit = denylist_match(
            "Risolto aumentando la quota della casella di posta a 2 GB.",
            &denylist,
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn empty_text_does_not_match() {
        assert_eq!(denylist_match("", &denylist()), None);
    }
}
