//! AnkiConnect request model
//!
//! Pure builders for the JSON bodies the importer POSTs to AnkiConnect.
//! Every request shares the same envelope:
//!
//! ```json
//! {"action": "createDeck", "version": 6, "params": {"deck": "Biology::Cells"}}
//! ```

use serde::{Deserialize, Serialize};

use crate::classify::Card;

/// AnkiConnect API version spoken by this crate
pub const ANKI_CONNECT_VERSION: u8 = 6;

/// Note fields, in template order
pub const MODEL_FIELDS: [&str; 4] = ["front", "back", "frontImg", "backImg"];

/// Field that receives question-side images
pub const FRONT_IMAGE_FIELD: &str = "frontImg";

/// Field that receives answer-side images
pub const BACK_IMAGE_FIELD: &str = "backImg";

const MODEL_CSS: &str = ".card {font-family: arial; font-size: 20px;text-align: center; color: black; background-color: white;}";
const TEMPLATE_NAME: &str = "卡片 1";
const TEMPLATE_FRONT: &str = "{{front}}<div></div>{{frontImg}}";
const TEMPLATE_BACK: &str =
    "{{front}}<div>{{frontImg}}</div><hr id=answer>{{back}}<div>{{backImg}}</div>";

/// Request envelope shared by every AnkiConnect action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request<P> {
    pub action: String,
    pub version: u8,
    pub params: P,
}

impl<P> Request<P> {
    pub fn new(action: &str, params: P) -> Self {
        Self {
            action: action.to_string(),
            version: ANKI_CONNECT_VERSION,
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDeckParams {
    pub deck: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardTemplate {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Front")]
    pub front: String,
    #[serde(rename = "Back")]
    pub back: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateModelParams {
    pub model_name: String,
    pub in_order_fields: Vec<String>,
    pub css: String,
    pub is_cloze: bool,
    pub card_templates: Vec<CardTemplate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteFields {
    #[serde(rename = "Front")]
    pub front: String,
    #[serde(rename = "Back")]
    pub back: String,
}

/// An image AnkiConnect downloads and stores into a note field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAttachment {
    pub url: String,
    pub filename: String,
    pub fields: Vec<String>,
}

impl MediaAttachment {
    fn for_field(url: &str, field: &str) -> Self {
        Self {
            url: url.to_string(),
            filename: url.to_string(),
            fields: vec![field.to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub deck_name: String,
    pub model_name: String,
    pub fields: NoteFields,
    pub tags: Vec<String>,
    pub picture: Vec<MediaAttachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddNoteParams {
    pub note: Note,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddNotesParams {
    pub notes: Vec<Note>,
}

/// Map a classified card to an AnkiConnect note using `model_name`
///
/// Question images are attached first (tagged `frontImg`), followed by
/// answer images (tagged `backImg`).
pub fn note_from_card(card: &Card, model_name: &str) -> Note {
    let picture = card
        .front_images
        .iter()
        .map(|url| MediaAttachment::for_field(url, FRONT_IMAGE_FIELD))
        .chain(
            card.back_images
                .iter()
                .map(|url| MediaAttachment::for_field(url, BACK_IMAGE_FIELD)),
        )
        .collect();

    Note {
        deck_name: card.deck_path.clone(),
        model_name: model_name.to_string(),
        fields: NoteFields {
            front: card.front_text.clone(),
            back: card.back_text.clone(),
        },
        tags: vec![String::new()],
        picture,
    }
}

pub fn create_deck_request(deck: &str) -> Request<CreateDeckParams> {
    Request::new(
        "createDeck",
        CreateDeckParams {
            deck: deck.to_string(),
        },
    )
}

/// The fixed note template every imported card uses
pub fn create_model_request(model_name: &str) -> Request<CreateModelParams> {
    Request::new(
        "createModel",
        CreateModelParams {
            model_name: model_name.to_string(),
            in_order_fields: MODEL_FIELDS.iter().map(|f| f.to_string()).collect(),
            css: MODEL_CSS.to_string(),
            is_cloze: false,
            card_templates: vec![CardTemplate {
                name: TEMPLATE_NAME.to_string(),
                front: TEMPLATE_FRONT.to_string(),
                back: TEMPLATE_BACK.to_string(),
            }],
        },
    )
}

pub fn add_note_request(note: Note) -> Request<AddNoteParams> {
    Request::new("addNote", AddNoteParams { note })
}

pub fn add_notes_request(notes: Vec<Note>) -> Request<AddNotesParams> {
    Request::new("addNotes", AddNotesParams { notes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_card() -> Card {
        Card {
            deck_path: "Bio::Cells".to_string(),
            front_text: "Q".to_string(),
            back_text: "A".to_string(),
            front_images: vec!["http://x/q1.png".to_string(), "http://x/q2.png".to_string()],
            back_images: vec!["http://x/a.png".to_string()],
        }
    }

    // ============================================================================
    // note_from_card tests
    // ============================================================================

    #[test]
    fn test_note_from_card_maps_fields() {
        let note = note_from_card(&sample_card(), "auto");
        assert_eq!(note.deck_name, "Bio::Cells");
        assert_eq!(note.model_name, "auto");
        assert_eq!(note.fields.front, "Q");
        assert_eq!(note.fields.back, "A");
        assert_eq!(note.tags, vec![String::new()]);
    }

    #[test]
    fn test_note_from_card_orders_front_images_first() {
        let note = note_from_card(&sample_card(), "auto");
        let tagged: Vec<(&str, &str)> = note
            .picture
            .iter()
            .map(|m| (m.url.as_str(), m.fields[0].as_str()))
            .collect();
        assert_eq!(
            tagged,
            vec![
                ("http://x/q1.png", "frontImg"),
                ("http://x/q2.png", "frontImg"),
                ("http://x/a.png", "backImg"),
            ]
        );
        assert!(note.picture.iter().all(|m| m.filename == m.url));
    }

    #[test]
    fn test_note_from_card_without_images() {
        let card = Card {
            front_images: vec![],
            back_images: vec![],
            ..sample_card()
        };
        assert!(note_from_card(&card, "auto").picture.is_empty());
    }

    // ============================================================================
    // Request serialization tests
    // ============================================================================

    #[test]
    fn test_create_deck_request_json() {
        let value = serde_json::to_value(create_deck_request("A::B")).unwrap();
        assert_eq!(
            value,
            json!({"action": "createDeck", "version": 6, "params": {"deck": "A::B"}})
        );
    }

    #[test]
    fn test_create_model_request_json() {
        let value = serde_json::to_value(create_model_request("auto")).unwrap();
        assert_eq!(value["action"], "createModel");
        assert_eq!(value["params"]["modelName"], "auto");
        assert_eq!(
            value["params"]["inOrderFields"],
            json!(["front", "back", "frontImg", "backImg"])
        );
        assert_eq!(value["params"]["isCloze"], false);
        assert_eq!(value["params"]["cardTemplates"][0]["Name"], "卡片 1");
        assert_eq!(
            value["params"]["cardTemplates"][0]["Front"],
            "{{front}}<div></div>{{frontImg}}"
        );
    }

    #[test]
    fn test_add_notes_request_json() {
        let note = note_from_card(&sample_card(), "auto");
        let value = serde_json::to_value(add_notes_request(vec![note])).unwrap();
        assert_eq!(value["action"], "addNotes");
        let note = &value["params"]["notes"][0];
        assert_eq!(note["deckName"], "Bio::Cells");
        assert_eq!(note["modelName"], "auto");
        assert_eq!(note["fields"], json!({"Front": "Q", "Back": "A"}));
        assert_eq!(note["tags"], json!([""]));
        assert_eq!(
            note["picture"][2],
            json!({"url": "http://x/a.png", "filename": "http://x/a.png", "fields": ["backImg"]})
        );
    }

    #[test]
    fn test_add_note_request_wraps_single_note() {
        let note = note_from_card(&sample_card(), "auto");
        let value = serde_json::to_value(add_note_request(note)).unwrap();
        assert_eq!(value["action"], "addNote");
        assert_eq!(value["params"]["note"]["deckName"], "Bio::Cells");
    }
}
