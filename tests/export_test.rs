//! End-to-end tests over complete export documents.
//!
//! The example fixture mirrors the shape of a real site export: one
//! customer, one site record, and a guide hierarchy that exercises pages,
//! boxes, and every asset flavor the schema carries.

use lgx::{Error, clean, convert, decode, read_export, slugify};
use serde_json::{Value, json};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> String {
    format!("{}/{}", FIXTURES_DIR, name)
}

fn fixture_bytes(name: &str) -> Vec<u8> {
    std::fs::read(fixture_path(name)).expect("Failed to read fixture")
}

fn decode_fixture(name: &str) -> lgx::GuideExport {
    decode(&fixture_bytes(name)).expect("Failed to decode fixture")
}

fn encode_to_value(export: &lgx::GuideExport) -> Value {
    let json = export.to_json().expect("Failed to encode export");
    serde_json::from_slice(&json).expect("Encoder produced invalid JSON")
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decode_example_export() {
    let export = decode_fixture("example_export.xml");

    let customer = export.customer.as_ref().expect("customer missing");
    assert_eq!(customer.id, 217);
    assert_eq!(customer.kind, "academic");
    assert_eq!(customer.name, "Westfield University Library");
    assert_eq!(customer.time_zone, "America/Los_Angeles");

    let site = export.site.as_ref().expect("site missing");
    assert_eq!(site.id, 412);
    assert_eq!(site.domain, "guides.westfield.edu");
    assert_eq!(site.admin, "libweb@westfield.edu");

    assert_eq!(export.accounts.len(), 2);
    assert_eq!(export.accounts[0].nickname, "M");
    assert_eq!(export.accounts[1].email, "dokafor@westfield.edu");
    assert_eq!(export.accounts[1].phone, "");

    assert_eq!(export.groups.len(), 1);
    assert_eq!(export.subjects.len(), 2);
    assert_eq!(export.subjects[1].name, "Data Science");
    assert_eq!(export.subjects[1].url, "");
    assert_eq!(export.tags.len(), 1);
    assert_eq!(export.vendors, "");
    assert_eq!(export.guides.len(), 2);
}

#[test]
fn test_decode_guide_hierarchy() {
    let export = decode_fixture("example_export.xml");
    let guide = &export.guides[0];

    assert_eq!(guide.id, 5501);
    assert_eq!(guide.kind, "subject");
    assert_eq!(guide.name, "Biology Research Guide");
    assert_eq!(
        guide.description,
        "Key resources for biology coursework & research."
    );
    assert_eq!(guide.status, "published");

    let owner = guide.owner.as_ref().expect("guide owner missing");
    assert_eq!(owner.id, 88);
    assert_eq!(owner.email, "mreyes@westfield.edu");

    let group = guide.group.as_ref().expect("guide group missing");
    assert_eq!(group.id, 12);
    assert_eq!(group.name, "Sciences");

    assert_eq!(guide.subjects.len(), 2);
    assert_eq!(guide.tags.len(), 1);
    assert_eq!(guide.pages.len(), 3);

    let home = &guide.pages[0];
    assert_eq!(home.name, "Home");
    assert_eq!(home.description, "<p>Start here.</p>");
    assert_eq!(home.boxes.len(), 2);

    let welcome = &home.boxes[0];
    assert_eq!(welcome.kind, "rich_text");
    assert_eq!(welcome.map_id, 401);
    assert_eq!(welcome.column, 1);
    assert_eq!(welcome.assets.len(), 2);
    assert_eq!(
        welcome.assets[0].description,
        "<p>Welcome to the <b>Biology</b> guide!</p>"
    );

    let book = &welcome.assets[1];
    assert_eq!(book.kind, "book");
    assert_eq!(book.author, "Urry, Lisa A.");
    assert_eq!(book.call_number, "QH308.2 .C34 2017");
    assert_eq!(book.enabled, 1);
    assert_eq!(book.isbn, "9780134093413");
    assert_eq!(book.publication_date, "2017");
    assert_eq!(book.owner.as_ref().expect("asset owner missing").id, 88);

    let link = &home.boxes[1].assets[0];
    assert_eq!(link.kind, "link");
    assert_eq!(link.url, "https://www.bioone.org/");
    assert_eq!(link.more_info, "Full-text biology journals.");
    assert_eq!(link.enabled, 0);

    let course = &export.guides[1];
    assert_eq!(course.kind, "course");
    assert_eq!(course.redirect, "https://guides.westfield.edu/biology");
    assert!(course.owner.is_none());
    assert!(course.pages.is_empty());
}

#[test]
fn test_pages_keep_document_order_not_position_order() {
    let export = decode_fixture("example_export.xml");
    let pages = &export.guides[0].pages;

    let ids: Vec<i64> = pages.iter().map(|p| p.id).collect();
    let positions: Vec<i64> = pages.iter().map(|p| p.position).collect();
    assert_eq!(ids, [9001, 9002, 9003]);
    // Positions are 2, 1, 3 in the fixture; document order wins.
    assert_eq!(positions, [2, 1, 3]);
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_encode_example_export() {
    let export = decode_fixture("example_export.xml");
    let value = encode_to_value(&export);

    assert_eq!(value["customer"]["name"], "Westfield University Library");
    assert_eq!(value["site"]["domain"], "guides.westfield.edu");
    assert_eq!(value["accounts"][0]["first_name"], "Marta");
    assert_eq!(value["vendors"], "");

    let guide = &value["guides"][0];
    assert_eq!(guide["type"], "subject");
    assert_eq!(guide["owner"]["email"], "mreyes@westfield.edu");
    assert_eq!(guide["subject"][1]["name"], "Data Science");
    assert_eq!(guide["tags"][0]["name"], "citations");
    assert_eq!(guide["pages"][0]["boxes"][0]["assets"][1]["isbn"], "9780134093413");
}

#[test]
fn test_encode_omits_empty_optional_fields() {
    let export = decode_fixture("example_export.xml");
    let value = encode_to_value(&export);

    // Marta has no skype, image, or address in the source.
    let marta = &value["accounts"][0];
    assert_eq!(marta["phone"], "555-0117");
    assert!(marta.get("skype").is_none());
    assert!(marta.get("image").is_none());
    assert!(marta.get("address").is_none());

    // Daniel carries only the identity fields, which always serialize.
    let daniel = &value["accounts"][1];
    assert_eq!(daniel["id"], 91);
    assert_eq!(daniel["email"], "dokafor@westfield.edu");
    assert!(daniel.get("nickname").is_none());
    assert!(daniel.get("created").is_none());

    // The redirect guide has no owner, group, description, or url.
    let course = &value["guides"][1];
    assert_eq!(course["redirect"], "https://guides.westfield.edu/biology");
    assert!(course.get("owner").is_none());
    assert!(course.get("group").is_none());
    assert!(course.get("description").is_none());
    assert!(course.get("url").is_none());

    // Structural integers stay even at zero; bib fields vanish when empty.
    let link = &value["guides"][0]["pages"][0]["boxes"][1]["assets"][0];
    assert_eq!(link["position"], 1);
    assert!(link.get("enabled").is_none());
    assert!(link.get("author").is_none());
    assert!(link.get("isbn").is_none());
    assert!(link.get("redirect").is_none());
}

#[test]
fn test_minimal_export_pins_empty_shapes() {
    let export = decode_fixture("minimal_export.xml");
    let value = encode_to_value(&export);

    let expected = json!({
        "customer": {"id": 1, "type": "", "name": "Solo Library"},
        "site": null,
        "accounts": [],
        "groups": [],
        "subjects": [],
        "tags": [],
        "vendors": "",
        "guides": [{
            "id": 2,
            "type": "",
            "name": "Lone Guide",
            "subject": [],
            "tags": [],
            "pages": []
        }]
    });
    assert_eq!(value, expected);
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_clean_then_decode_handles_dirty_exports() {
    let src = fixture_bytes("example_export.xml");

    // Pollute the document the way broken authoring tools do.
    let mut dirty = Vec::with_capacity(src.len() * 2);
    for &b in &src {
        dirty.push(b);
        if b == b'>' {
            dirty.extend_from_slice(&[0x01, 0x0B, 0x13]);
        }
    }

    assert_eq!(clean(&dirty).as_ref(), src.as_slice());
    let export = decode(&clean(&dirty)).expect("Failed to decode cleaned export");
    assert_eq!(export, decode(&src).expect("Failed to decode clean export"));
}

#[test]
fn test_read_export_sanitizes_and_decodes() {
    let from_file =
        read_export(fixture_path("example_export.xml")).expect("Failed to read export");
    let from_bytes = decode(&fixture_bytes("example_export.xml")).unwrap();
    assert_eq!(from_file, from_bytes);
}

#[test]
fn test_read_export_missing_file_is_io_error() {
    let err = read_export(fixture_path("no_such_export.xml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "got {err:?}");
}

#[test]
fn test_convert_matches_decode_plus_encode() {
    let src = fixture_bytes("example_export.xml");
    let converted: Value =
        serde_json::from_slice(&convert(&src).expect("Failed to convert")).unwrap();

    let export = decode(&src).unwrap();
    assert_eq!(converted, encode_to_value(&export));
}

#[test]
fn test_malformed_export_is_an_error() {
    // Unclosed <tags> element.
    let err = decode(b"<lgdata><tags><id>7</id>").unwrap_err();
    assert!(
        matches!(err, Error::Xml { .. } | Error::UnexpectedEof(_)),
        "got {err:?}"
    );
}

// ============================================================================
// Slugs
// ============================================================================

#[test]
fn test_slugify_decoded_guide_names() {
    let export = decode_fixture("example_export.xml");
    assert_eq!(slugify(&export.guides[0].name), "biology-research-guide");
    assert_eq!(slugify(&export.guides[1].name), "bio-101-intro-biology");
    assert_eq!(
        slugify(&export.guides[0].pages[1].name),
        "articles-databases"
    );
}
