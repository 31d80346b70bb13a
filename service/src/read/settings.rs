//! Site settings read model.

use serde::{Deserialize, Serialize};

/// Publicly visible key-value settings of the site.
///
/// Keys missing on the backend simply stay [`None`], the site renders
/// without them.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Settings {
    /// Title of the site.
    #[serde(default)]
    pub site_title: Option<String>,

    /// Tagline of the site.
    #[serde(default)]
    pub site_description: Option<String>,

    /// Contact phone, as displayed in the site header.
    #[serde(default)]
    pub phone: Option<String>,

    /// Contact e-mail.
    #[serde(default)]
    pub email: Option<String>,

    /// Office address.
    #[serde(default)]
    pub address: Option<String>,

    /// Office work hours.
    #[serde(default)]
    pub work_hours: Option<String>,

    /// Telegram contact link.
    #[serde(default)]
    pub telegram: Option<String>,

    /// WhatsApp contact link.
    #[serde(default)]
    pub whatsapp: Option<String>,

    /// VK community link.
    #[serde(default)]
    pub vk: Option<String>,

    /// Privacy policy text.
    #[serde(default)]
    pub privacy_policy: Option<String>,
}
