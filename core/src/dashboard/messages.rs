//! User-facing texts (`pl-PL`).
//!
//! Backend error detail never ends up in these; it only goes to the log.

/// Login rejected.
pub const LOGIN_FAILED: &str = "Błędny email lub hasło.";

/// Landing list could not be fetched.
pub const LANDINGS_FAILED: &str = "Błąd pobierania landingów.";

/// The account has no landings.
pub const NO_LANDINGS: &str = "Brak landingów przypisanych do konta.";

/// Lead list could not be fetched.
pub const LEADS_FAILED: &str = "Błąd pobierania leadów.";

/// Status change was not saved.
pub const STATUS_UPDATE_FAILED: &str = "Nie udało się zmienić statusu.";

/// CSV export could not be fetched.
pub const EXPORT_FAILED: &str = "Błąd eksportu.";

/// Summary line after a successful lead load.
pub fn lead_count(count: usize) -> String {
    format!("Leadów: {}", count)
}
