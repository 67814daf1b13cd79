use std::io::Read;

/// Raw spreadsheet contents: the header row and the data rows that follow.
#[derive(Debug, Default)]
pub(crate) struct CsvSheet {
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<Vec<String>>,
}

/// Reads comma-separated text. Quoted fields may contain commas and doubled
/// quotes; rows may be ragged; rows without any content are dropped.
pub(crate) fn read_sheet<R: Read>(reader: R) -> Result<CsvSheet, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut sheet = CsvSheet::default();
    let mut saw_header = false;

    for record in csv_reader.records() {
        let record = record?;
        let fields: Vec<String> = record.iter().map(str::to_string).collect();
        if fields.iter().all(|field| field.is_empty()) {
            continue;
        }

        if saw_header {
            sheet.rows.push(fields);
        } else {
            sheet.headers = fields;
            saw_header = true;
        }
    }

    Ok(sheet)
}
