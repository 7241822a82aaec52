use chrono::NaiveDateTime;
use lazy_static::lazy_static;

use crate::content::{ContentItem, ContentMeta, ProgramRecord, Tag};
use crate::text_utils::parse_date_time;

lazy_static! {
    static ref PROGRAMS: Vec<ProgramRecord> = declare_programs();
}

/// Not file backed: each tool is declared with the function that renders
/// its page shell. Everything below the shell runs client side.
fn declare_programs() -> Vec<ProgramRecord> {
    vec![
        ProgramRecord {
            meta: ContentMeta {
                id: "c3f1a8d0-6b42-4e19-8d5a-2f7c9e0b1a64".to_string(),
                slug: "chunker".to_string(),
                created_at: program_date("2024-09-15"),
                updated_at: program_date("2024-10-02"),
                title: "Chunker".to_string(),
                short_title: None,
                description: Some(
                    "Splits long text into pasteable chunks of a chosen size.".to_string(),
                ),
                hero_image: None,
                tags: vec![Tag::Ai, Tag::Software],
            },
            page: chunker_page,
        },
        ProgramRecord {
            meta: ContentMeta {
                id: "9e8d7c6b-5a49-4382-b1c0-d9e8f7a6b5c4".to_string(),
                slug: "sweetener".to_string(),
                created_at: program_date("2024-11-20"),
                updated_at: program_date("2024-11-20"),
                title: "Sweetener".to_string(),
                short_title: None,
                description: Some(
                    "Compares the sugar content of everyday foods and drinks.".to_string(),
                ),
                hero_image: None,
                tags: vec![Tag::Health],
            },
            page: sweetener_page,
        },
    ]
}

// Program dates are fixed literals, checked by the test below.
fn program_date(value: &str) -> NaiveDateTime {
    parse_date_time(value).expect("program dates are literals")
}

pub fn all_programs() -> &'static [ProgramRecord] {
    &PROGRAMS
}

pub fn program_by_slug(slug: &str) -> Option<&'static ProgramRecord> {
    PROGRAMS.iter().find(|p| p.meta.slug == slug)
}

pub fn programs_feed() -> Vec<ContentItem> {
    PROGRAMS.iter().cloned().map(ContentItem::Program).collect()
}

fn chunker_page() -> String {
    r#"<section class="program" id="chunker">
  <p>Paste text below, pick a chunk size, and copy the pieces one by one.</p>
  <textarea id="chunker-input" rows="10" placeholder="Paste your text here"></textarea>
  <label>Chunk size <input type="number" id="chunker-size" value="2000" min="100" step="100"></label>
  <button id="chunker-split">Split</button>
  <div id="chunker-output"></div>
  <script src="/public/programs/chunker.js"></script>
</section>
"#
    .to_string()
}

fn sweetener_page() -> String {
    r#"<section class="program" id="sweetener">
  <p>Pick a food or drink to see its sugar next to everyday references.</p>
  <select id="sweetener-item">
    <option value="">Choose an item</option>
  </select>
  <div id="sweetener-output"></div>
  <script src="/public/programs/sweetener.js"></script>
</section>
"#
    .to_string()
}
