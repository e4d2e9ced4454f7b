//! Localized notification and status strings.

use serde::{Deserialize, Serialize};

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Fr];

    /// Language name shown in the preferences picker.
    pub fn name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Fr => "Français",
        }
    }
}

/// Message keys for toasts and status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    LoadFailed,
    SaveFailed,
    Saved,
    SchoolCreated,
    PlanChanged,
    CreditRecorded,
    EventCreated,
    EventDeleted,
    RequestApproved,
    RequestRejected,
    StatusUpdated,
    RoleSaved,
    RoleDeleted,
    AdminCreated,
    AdminUpdated,
    AdminDeleted,
    PolicySaved,
    SsoSaved,
    MfaSetupStarted,
    MfaEnabled,
    MfaDisabled,
    SignupSubmitted,
    ReportGenerated,
    ExportCompleted,
    ExportFailed,
    ConnectionOk,
    ConnectionFailed,
    Unauthorized,
    NoData,
    Loading,
    RequiredField,
    SelectPlan,
    AmountRequired,
    InvalidTime,
    Testing,
    StatusNotChecked,
    StatusChecking,
    StatusOnline,
    StatusOffline,
    StatusUnauthorized,
    NoToken,
}

impl Msg {
    pub const ALL: [Msg; 41] = [
        Msg::LoadFailed,
        Msg::SaveFailed,
        Msg::Saved,
        Msg::SchoolCreated,
        Msg::PlanChanged,
        Msg::CreditRecorded,
        Msg::EventCreated,
        Msg::EventDeleted,
        Msg::RequestApproved,
        Msg::RequestRejected,
        Msg::StatusUpdated,
        Msg::RoleSaved,
        Msg::RoleDeleted,
        Msg::AdminCreated,
        Msg::AdminUpdated,
        Msg::AdminDeleted,
        Msg::PolicySaved,
        Msg::SsoSaved,
        Msg::MfaSetupStarted,
        Msg::MfaEnabled,
        Msg::MfaDisabled,
        Msg::SignupSubmitted,
        Msg::ReportGenerated,
        Msg::ExportCompleted,
        Msg::ExportFailed,
        Msg::ConnectionOk,
        Msg::ConnectionFailed,
        Msg::Unauthorized,
        Msg::NoData,
        Msg::Loading,
        Msg::RequiredField,
        Msg::SelectPlan,
        Msg::AmountRequired,
        Msg::InvalidTime,
        Msg::Testing,
        Msg::StatusNotChecked,
        Msg::StatusChecking,
        Msg::StatusOnline,
        Msg::StatusOffline,
        Msg::StatusUnauthorized,
        Msg::NoToken,
    ];
}

/// Look up the text for a message key.
pub fn tr(locale: Locale, msg: Msg) -> &'static str {
    match locale {
        Locale::En => en(msg),
        Locale::Fr => fr(msg),
    }
}

fn en(msg: Msg) -> &'static str {
    match msg {
        Msg::LoadFailed => "Failed to load data",
        Msg::SaveFailed => "Failed to save changes",
        Msg::Saved => "Changes saved",
        Msg::SchoolCreated => "School created",
        Msg::PlanChanged => "Plan updated",
        Msg::CreditRecorded => "Balance credit recorded",
        Msg::EventCreated => "Event created",
        Msg::EventDeleted => "Event deleted",
        Msg::RequestApproved => "Request approved",
        Msg::RequestRejected => "Request rejected",
        Msg::StatusUpdated => "Status updated",
        Msg::RoleSaved => "Role saved",
        Msg::RoleDeleted => "Role deleted",
        Msg::AdminCreated => "Administrator added",
        Msg::AdminUpdated => "Administrator updated",
        Msg::AdminDeleted => "Administrator removed",
        Msg::PolicySaved => "Security policy saved",
        Msg::SsoSaved => "SSO settings saved",
        Msg::MfaSetupStarted => "Scan the secret with your authenticator app",
        Msg::MfaEnabled => "Multi-factor authentication enabled",
        Msg::MfaDisabled => "Multi-factor authentication disabled",
        Msg::SignupSubmitted => "Trial request submitted",
        Msg::ReportGenerated => "Report generated",
        Msg::ExportCompleted => "Exported to",
        Msg::ExportFailed => "Export failed",
        Msg::ConnectionOk => "Connection successful",
        Msg::ConnectionFailed => "Connection failed",
        Msg::Unauthorized => "Session token rejected, check the API settings",
        Msg::NoData => "No data",
        Msg::Loading => "Loading...",
        Msg::RequiredField => "Please fill in all required fields",
        Msg::SelectPlan => "Select a plan",
        Msg::AmountRequired => "Enter an amount",
        Msg::InvalidTime => "Time must be HH:MM",
        Msg::Testing => "Testing...",
        Msg::StatusNotChecked => "Not checked",
        Msg::StatusChecking => "Checking...",
        Msg::StatusOnline => "Online",
        Msg::StatusOffline => "Unreachable",
        Msg::StatusUnauthorized => "Unauthorized",
        Msg::NoToken => "(no token)",
    }
}

fn fr(msg: Msg) -> &'static str {
    match msg {
        Msg::LoadFailed => "Échec du chargement des données",
        Msg::SaveFailed => "Échec de l'enregistrement",
        Msg::Saved => "Modifications enregistrées",
        Msg::SchoolCreated => "École créée",
        Msg::PlanChanged => "Forfait mis à jour",
        Msg::CreditRecorded => "Crédit enregistré",
        Msg::EventCreated => "Événement créé",
        Msg::EventDeleted => "Événement supprimé",
        Msg::RequestApproved => "Demande approuvée",
        Msg::RequestRejected => "Demande refusée",
        Msg::StatusUpdated => "Statut mis à jour",
        Msg::RoleSaved => "Rôle enregistré",
        Msg::RoleDeleted => "Rôle supprimé",
        Msg::AdminCreated => "Administrateur ajouté",
        Msg::AdminUpdated => "Administrateur mis à jour",
        Msg::AdminDeleted => "Administrateur retiré",
        Msg::PolicySaved => "Politique de sécurité enregistrée",
        Msg::SsoSaved => "Paramètres SSO enregistrés",
        Msg::MfaSetupStarted => "Scannez le secret avec votre application d'authentification",
        Msg::MfaEnabled => "Authentification multifacteur activée",
        Msg::MfaDisabled => "Authentification multifacteur désactivée",
        Msg::SignupSubmitted => "Demande d'essai envoyée",
        Msg::ReportGenerated => "Rapport généré",
        Msg::ExportCompleted => "Exporté vers",
        Msg::ExportFailed => "Échec de l'export",
        Msg::ConnectionOk => "Connexion réussie",
        Msg::ConnectionFailed => "Échec de la connexion",
        Msg::Unauthorized => "Jeton de session refusé, vérifiez les paramètres de l'API",
        Msg::NoData => "Aucune donnée",
        Msg::Loading => "Chargement...",
        Msg::RequiredField => "Veuillez remplir tous les champs obligatoires",
        Msg::SelectPlan => "Choisissez un forfait",
        Msg::AmountRequired => "Saisissez un montant",
        Msg::InvalidTime => "L'heure doit être au format HH:MM",
        Msg::Testing => "Test en cours...",
        Msg::StatusNotChecked => "Non vérifié",
        Msg::StatusChecking => "Vérification...",
        Msg::StatusOnline => "En ligne",
        Msg::StatusOffline => "Injoignable",
        Msg::StatusUnauthorized => "Non autorisé",
        Msg::NoToken => "(aucun jeton)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_translated() {
        for locale in Locale::ALL {
            for msg in Msg::ALL {
                assert!(!tr(locale, msg).is_empty(), "{locale:?} missing {msg:?}");
            }
        }
    }

    #[test]
    fn test_keys_listed_once() {
        let unique: std::collections::HashSet<String> = Msg::ALL.iter().map(|m| format!("{m:?}")).collect();
        assert_eq!(unique.len(), Msg::ALL.len());
    }

    #[test]
    fn test_locales_differ() {
        assert_ne!(tr(Locale::En, Msg::Saved), tr(Locale::Fr, Msg::Saved));
    }

    #[test]
    fn test_locale_serde() {
        #[derive(Deserialize)]
        struct Wrap {
            locale: Locale,
        }
        let w: Wrap = toml::from_str("locale = \"fr\"").unwrap();
        assert_eq!(w.locale, Locale::Fr);
    }
}
