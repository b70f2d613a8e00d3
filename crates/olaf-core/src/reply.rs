//! Outbound reply templates.
//!
//! Pure mapping from a dispatch terminal state (plus interpolation fields)
//! to the fixed set of user-facing strings. No business logic lives here —
//! the dispatcher decides, this module only renders.

/// One user-facing reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Success confirmation for a persisted item.
    Added {
        quantity_text: Option<String>,
        food_name: String,
        location: String,
    },
    /// Voice note received; transcription is not available yet.
    AudioNotSupported,
    /// Message had no usable text.
    NotUnderstood,
    /// Inventory listing placeholder.
    QueryPlaceholder,
    /// Ask the user for the missing item/location details.
    Clarify,
    /// Generic processing failure, ask to retry later.
    ProcessingError,
}

impl Reply {
    /// Render the template to the final message body.
    pub fn render(&self) -> String {
        match self {
            Reply::Added {
                quantity_text,
                food_name,
                location,
            } => {
                let mut item = String::new();
                if let Some(qty) = quantity_text {
                    if !qty.is_empty() {
                        item.push_str(qty);
                        item.push(' ');
                    }
                }
                format!("✅ Dodano: {}{} → {}", item, food_name, location)
            }
            Reply::AudioNotSupported => "🎤 Primio sam audio, transkripcija uskoro...".to_string(),
            Reply::NotUnderstood => "❓ Nisam razumio poruku".to_string(),
            Reply::QueryPlaceholder => "📦 Radim popis tvoje hrane... (uskoro)".to_string(),
            Reply::Clarify => {
                "❓ Molim te reci što točno i gdje (škrinja/hladnjak/ostava)?".to_string()
            }
            Reply::ProcessingError => "⚠️ Greška u obradi. Pokušaj ponovo.".to_string(),
        }
    }
}
