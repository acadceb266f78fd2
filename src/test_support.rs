// file: src/test_support.rs
// description: builders for small docx/xlsx/pdf fixtures used by unit tests

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;

pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    for (name, body) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn paragraph_xml(text: &str) -> String {
    if text.is_empty() {
        "<w:p/>".to_string()
    } else {
        format!(
            "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            escape(text)
        )
    }
}

/// `word/document.xml` with the paragraphs first, then each table.
pub fn document_xml(paragraphs: &[&str], tables: &[Vec<Vec<&str>>]) -> String {
    let mut body = String::new();
    for text in paragraphs {
        body.push_str(&paragraph_xml(text));
    }
    for table in tables {
        body.push_str("<w:tbl>");
        for row in table {
            body.push_str("<w:tr>");
            for cell in row {
                body.push_str("<w:tc>");
                body.push_str(&paragraph_xml(cell));
                body.push_str("</w:tc>");
            }
            body.push_str("</w:tr>");
        }
        body.push_str("</w:tbl>");
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{}</w:body></w:document>",
        body
    )
}

pub fn write_docx(path: &Path, paragraphs: &[&str], tables: &[Vec<Vec<&str>>]) {
    let xml = document_xml(paragraphs, tables);
    write_zip(
        path,
        &[
            (
                "[Content_Types].xml",
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
                 <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
                 <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
                 <Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
                 </Types>",
            ),
            ("word/document.xml", xml.as_str()),
        ],
    );
}

/// Sheets of `(row, column, text)` cells, 1-based, stored as inline strings.
pub fn write_xlsx(path: &Path, sheets: &[(&str, &[(u32, u32, &str)])]) {
    let sheet_rows: Vec<(&str, String)> = sheets
        .iter()
        .map(|(name, cells)| (*name, inline_rows(cells)))
        .collect();
    let borrowed: Vec<(&str, &str)> = sheet_rows
        .iter()
        .map(|(name, rows)| (*name, rows.as_str()))
        .collect();
    write_xlsx_rows(path, &borrowed);
}

fn inline_rows(cells: &[(u32, u32, &str)]) -> String {
    let mut sorted: Vec<(u32, u32, &str)> = cells.to_vec();
    sorted.sort_by_key(|(row, column, _)| (*row, *column));

    let mut rows = String::new();
    let mut current_row = None;
    for (row, column, text) in sorted {
        if current_row != Some(row) {
            if current_row.is_some() {
                rows.push_str("</row>");
            }
            rows.push_str(&format!("<row r=\"{}\">", row));
            current_row = Some(row);
        }
        rows.push_str(&format!(
            "<c r=\"{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
            crate::models::cell_reference(row, column),
            escape(text)
        ));
    }
    if current_row.is_some() {
        rows.push_str("</row>");
    }
    rows
}

/// Sheets given as raw `<row>` markup for `<sheetData>`.
pub fn write_xlsx_rows(path: &Path, sheets: &[(&str, &str)]) {
    let mut workbook_sheets = String::new();
    let mut relationships = String::new();
    let mut content_overrides = String::new();
    let mut worksheets = Vec::new();

    for (index, (name, rows)) in sheets.iter().enumerate() {
        let number = index + 1;
        workbook_sheets.push_str(&format!(
            "<sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
            escape(name),
            number,
            number
        ));
        relationships.push_str(&format!(
            "<Relationship Id=\"rId{}\" \
             Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" \
             Target=\"worksheets/sheet{}.xml\"/>",
            number, number
        ));
        content_overrides.push_str(&format!(
            "<Override PartName=\"/xl/worksheets/sheet{}.xml\" \
             ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>",
            number
        ));

        worksheets.push((
            format!("xl/worksheets/sheet{}.xml", number),
            format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
                 <worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">\
                 <sheetData>{}</sheetData></worksheet>",
                rows
            ),
        ));
    }

    let content_types = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>\
         {}</Types>",
        content_overrides
    );
    let root_rels = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
        <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
        <Relationship Id=\"rId1\" \
        Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" \
        Target=\"xl/workbook.xml\"/></Relationships>";
    let workbook = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <workbook xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">\
         <sheets>{}</sheets></workbook>",
        workbook_sheets
    );
    let workbook_rels = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         {}</Relationships>",
        relationships
    );

    let mut entries: Vec<(&str, &str)> = vec![
        ("[Content_Types].xml", content_types.as_str()),
        ("_rels/.rels", root_rels),
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", workbook_rels.as_str()),
    ];
    for (name, body) in &worksheets {
        entries.push((name.as_str(), body.as_str()));
    }
    write_zip(path, &entries);
}

/// One page per entry, each page showing its text in a standard font.
pub fn write_pdf(path: &Path, pages: &[&str]) {
    build_pdf(pages).save(path).unwrap();
}

/// A pdf whose trailer declares standard security with a user password.
pub fn write_encrypted_pdf(path: &Path, pages: &[&str]) {
    let mut doc = build_pdf(pages);
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "O" => Object::string_literal(vec![0x4fu8; 32]),
        "U" => Object::string_literal(vec![0x55u8; 32]),
        "P" => -44,
    });
    doc.trailer.set("Encrypt", encrypt_id);
    doc.trailer.set(
        "ID",
        vec![
            Object::string_literal(vec![1u8; 16]),
            Object::string_literal(vec![1u8; 16]),
        ],
    );
    doc.save(path).unwrap();
}

fn build_pdf(pages: &[&str]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}
