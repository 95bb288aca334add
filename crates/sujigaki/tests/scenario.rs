//! End-to-end pipeline: roster + template files in, documents out.

use std::io::Write;

use sujigaki::cli::{page_chrome, script_table_spec};
use sujigaki::{
    load_template_path, ResolvedRow, Session, SubstitutionMap, FIELD_TITLES,
};
use sujigaki_render::{export_csv, export_xlsx, DrawBackend, TextBackend};

const ROSTER_CSV: &str = "\
氏名,区分,会社名,紹介者,懇親会
桜井 有里,★司会,桜井企画,,参加予定
神田橋 あずさ,★,神田橋堂,,不参加
赤間 勇介,ゲスト,勇和工業,中島 啓吾,
宮城 健,ゲスト,,比嘉 実,参加予定
島袋 純,代表,島袋物産,,参加予定
比嘉 実,旗手,比嘉商事,,
";

const TEMPLATE_CSV: &str = "\
時間,担当,準備・動き,進行内容
14:00,司会,照明OFF,オープニング動画開始。
14:03,司会,照明ON,本日の司会は {hosts}、計時は {timekeeper} が務めます。
14:10,代表,マイク,代表 {representative} より挨拶。旗手は {flag_bearer} です。
[GUESTS],,,
14:30,司会,,テーブルリーダーは {leads} です。ゲストは {guest_count} 名。
";

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn merged_session() -> Session {
    let roster = write_temp(ROSTER_CSV);
    let template_file = write_temp(TEMPLATE_CSV);

    let mut session = Session::new();
    session.load_roster_path(roster.path()).unwrap();
    let template = load_template_path(template_file.path()).unwrap();

    let mut subs = SubstitutionMap::from_facts(session.facts());
    subs.set("hosts", "桜井 有里、神田橋 あずさ");
    subs.set("timekeeper", "宮里 守");
    session.merge_template(&template, &subs);
    session
}

#[test]
fn pipeline_resolves_every_placeholder_and_expands_guests() {
    let session = merged_session();

    // 5 template rows, one marker, two guests.
    assert_eq!(session.rows().len(), 6);

    let contents: Vec<&str> = session.rows().iter().map(|r| r.content.as_str()).collect();
    assert_eq!(contents[0], "オープニング動画開始。");
    assert_eq!(
        contents[1],
        "本日の司会は 桜井 有里、神田橋 あずさ、計時は 宮里 守 が務めます。"
    );
    assert_eq!(contents[2], "代表 島袋 純 より挨拶。旗手は 比嘉 実 です。");
    assert_eq!(contents[3], "1) 紹介者：中島 啓吾 / ゲスト：勇和工業 赤間 勇介");
    assert_eq!(contents[4], "2) 紹介者：比嘉 実 / ゲスト：－ 宮城 健");
    assert_eq!(
        contents[5],
        "テーブルリーダーは 桜井 有里、神田橋 あずさ です。ゲストは 2 名。"
    );
    assert!(!contents.iter().any(|c| c.contains('{')));
}

#[test]
fn text_document_pages_carry_header_and_all_rows() {
    let mut session = merged_session();
    // Pad with enough rows to force a second page.
    for i in 0..40 {
        session.insert_row(
            usize::MAX,
            ResolvedRow::new(format!("15:{i:02}"), "司会", "", "連絡事項。"),
        );
    }

    let rows: Vec<Vec<String>> = session.rows().iter().map(|r| r.to_cells()).collect();
    let chrome = page_chrome(Some("第56回例会"), Some("2026-09-05"));
    let text = TextBackend::new()
        .rows_per_page(20)
        .render_to_string(&script_table_spec(), &chrome, &rows);

    let pages: Vec<&str> = text.split('\u{0c}').collect();
    assert!(pages.len() >= 2);
    for page in &pages {
        assert!(page.contains("第56回例会 進行シナリオ"));
        assert!(page.contains("2026年9月5日"));
        assert!(page.contains("進行内容"));
    }
    assert!(text.contains("オープニング動画開始。"));
    assert!(text.contains("15:39"));
}

#[test]
fn exports_share_the_merged_rows() {
    let session = merged_session();
    let rows: Vec<Vec<String>> = session.rows().iter().map(|r| r.to_cells()).collect();

    let xlsx = export_xlsx(&FIELD_TITLES, &rows).unwrap();
    assert!(xlsx.starts_with(b"PK"));

    let csv_bytes = export_csv(&FIELD_TITLES, &rows).unwrap();
    let csv_text = String::from_utf8(csv_bytes).unwrap();
    assert_eq!(csv_text.lines().count(), 1 + rows.len());
    assert!(csv_text.lines().next().unwrap().contains("進行内容"));
    assert!(csv_text.contains("赤間 勇介"));
}

#[test]
fn text_render_matches_draw_backend_bytes() {
    let session = merged_session();
    let rows: Vec<Vec<String>> = session.rows().iter().map(|r| r.to_cells()).collect();
    let chrome = page_chrome(None, None);
    let backend = TextBackend::new();

    let string = backend.render_to_string(&script_table_spec(), &chrome, &rows);
    let bytes = backend.render(&script_table_spec(), &chrome, &rows).unwrap();
    assert_eq!(string.into_bytes(), bytes);
}
