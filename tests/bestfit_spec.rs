use cpmaker::codepage::{
    classify, parse_best_fit, parse_plain, CodePageError, LineKind, LookupTables, ParseState,
    Parser, FROM_UNICODE_OFFSET, SERIALIZED_LEN, TABLE_LEN, TO_UNICODE_OFFSET,
};

const DEFAULT_CP: u16 = 0x3f;
const DEFAULT_UNI: u16 = 0xfffd;

/// The end-to-end scenario: one single-byte record and one wide-char record
/// on top of the default pair.
const CP1252_MINIMAL: &str = "\
; Windows code page 1252, trimmed to the Euro sign
CODEPAGE
CPINFO 1252 0x3f 0xfffd
MBTABLE 1
0x80 0x20ac
WCTABLE 1
0x20ac 0x80
ENDCODEPAGE
";

/// One lead-byte range spanning two leads, one trail record per lead.
const DBCS_SPAN: &str = "\
CODEPAGE
CPINFO 932 0x3f 0xfffd
DBCSRANGE 1
0x81 0x82
DBCSTABLE 1
0x40 0x4e00
DBCSTABLE 1
0x40 0x4e01
ENDCODEPAGE
";

/// Two single-lead ranges, exercising the range-to-range epilogue.
const DBCS_TWO_RANGES: &str = "\
CODEPAGE
CPINFO 932 0x3f 0xfffd
DBCSRANGE 2
0x81 0x81
DBCSTABLE 1
0x40 0x4e00
0x82 0x82
DBCSTABLE 1
0x40 0x4e00
ENDCODEPAGE
";

fn parse(input: &str) -> LookupTables {
    parse_best_fit(input).unwrap_or_else(|e| panic!("parse failed: {}", e))
}

/// Assert every entry of both tables holds the default pair except the
/// listed overrides.
fn assert_defaults_except(
    tables: &LookupTables,
    to_unicode_overrides: &[(u16, u16)],
    from_unicode_overrides: &[(u16, u16)],
) {
    for cp in 0..=0xFFFFu16 {
        let expected = to_unicode_overrides
            .iter()
            .find(|(index, _)| *index == cp)
            .map(|(_, value)| *value)
            .unwrap_or(DEFAULT_UNI);
        assert_eq!(
            tables.to_unicode(cp),
            expected,
            "to_unicode[{:#06x}] mismatch",
            cp
        );
    }
    for uni in 0..=0xFFFFu16 {
        let expected = from_unicode_overrides
            .iter()
            .find(|(index, _)| *index == uni)
            .map(|(_, value)| *value)
            .unwrap_or(DEFAULT_CP);
        assert_eq!(
            tables.from_unicode(uni),
            expected,
            "from_unicode[{:#06x}] mismatch",
            uni
        );
    }
}

#[test]
fn default_pair_prefills_both_tables() {
    let tables = parse(
        "CODEPAGE\n\
         CPINFO 1252 0x3f 0xfffd\n\
         ENDCODEPAGE\n",
    );
    assert_eq!(tables.codepage(), 1252);
    assert_defaults_except(&tables, &[], &[]);
}

#[test]
fn single_byte_record_overrides_exactly_one_entry() {
    let tables = parse(
        "CODEPAGE\n\
         CPINFO 1252 0x3f 0xfffd\n\
         MBTABLE 1\n\
         0x80 0x20ac\n\
         ENDCODEPAGE\n",
    );
    assert_defaults_except(&tables, &[(0x80, 0x20ac)], &[]);
}

#[test]
fn wide_char_record_overrides_exactly_one_entry() {
    let tables = parse(
        "CODEPAGE\n\
         CPINFO 1252 0x3f 0xfffd\n\
         WCTABLE 1\n\
         0x20ac 0x80\n\
         ENDCODEPAGE\n",
    );
    assert_defaults_except(&tables, &[], &[(0x20ac, 0x80)]);
}

#[test]
fn dbcs_range_composes_lead_and_trail() {
    let tables = parse(DBCS_SPAN);
    assert_defaults_except(&tables, &[(0x8140, 0x4e00), (0x8240, 0x4e01)], &[]);
}

#[test]
fn dbcs_group_advances_across_ranges() {
    let tables = parse(DBCS_TWO_RANGES);
    assert_defaults_except(&tables, &[(0x8140, 0x4e00), (0x8240, 0x4e00)], &[]);
}

#[test]
fn end_to_end_scenario() {
    let tables = parse(CP1252_MINIMAL);
    assert_eq!(tables.codepage(), 1252);
    assert_defaults_except(&tables, &[(0x80, 0x20ac)], &[(0x20ac, 0x80)]);
    assert_eq!(tables.to_bytes().len(), SERIALIZED_LEN);
    assert_eq!(SERIALIZED_LEN, 262144);
}

#[test]
fn serialized_layout_order() {
    let tables = parse(CP1252_MINIMAL);
    let bytes = tables.to_bytes();

    // Unicode-to-codepage half first: element 0x20ac holds 0x0080.
    let offset = (FROM_UNICODE_OFFSET + 0x20ac) * 2;
    assert_eq!(&bytes[offset..offset + 2], &[0x80, 0x00]);

    // Codepage-to-Unicode half second: element 0x80 holds 0x20ac,
    // least-significant byte first.
    let offset = (TO_UNICODE_OFFSET + 0x80) * 2;
    assert_eq!(&bytes[offset..offset + 2], &[0xac, 0x20]);

    // A default entry in each half.
    let offset = (FROM_UNICODE_OFFSET + 0x41) * 2;
    assert_eq!(&bytes[offset..offset + 2], &[0x3f, 0x00]);
    let offset = (TO_UNICODE_OFFSET + 0x41) * 2;
    assert_eq!(&bytes[offset..offset + 2], &[0xfd, 0xff]);

    assert_eq!(TO_UNICODE_OFFSET, TABLE_LEN);
}

#[test]
fn write_to_matches_to_bytes() {
    let tables = parse(CP1252_MINIMAL);
    let mut written = Vec::new();
    tables.write_to(&mut written).expect("write to Vec");
    assert_eq!(written, tables.to_bytes());
}

#[test]
fn comments_and_unrecognized_lines_are_skipped() {
    let tables = parse(
        "; leading comment\n\
         noise before the section\n\
         CODEPAGE\n\
         ; comment between markers\n\
         CPINFO 1252 0x3f 0xfffd\n\
         MBTABLE 1\n\
         ; comment inside a counted block\n\
         not a record at all\n\
         0x80 0x20ac\n\
         ENDCODEPAGE\n",
    );
    assert_defaults_except(&tables, &[(0x80, 0x20ac)], &[]);
}

#[test]
fn truncated_block_fails_with_premature_end() {
    // Declared two records, supplied one; the rest of the input never
    // matches, so the block cannot terminate.
    let result = parse_best_fit(
        "CODEPAGE\n\
         CPINFO 1252 0x3f 0xfffd\n\
         MBTABLE 2\n\
         0x80 0x20ac\n\
         garbage\n\
         more garbage\n",
    );
    match result {
        Err(CodePageError::PrematureEnd { .. }) => {}
        other => panic!("expected PrematureEnd, got {:?}", other.map(|t| t.codepage())),
    }
}

#[test]
fn section_end_inside_counted_block_is_not_terminal() {
    // ENDCODEPAGE only terminates from the table-search state; inside a
    // counted block it is just another unrecognized line.
    let result = parse_best_fit(
        "CODEPAGE\n\
         CPINFO 1252 0x3f 0xfffd\n\
         MBTABLE 2\n\
         0x80 0x20ac\n\
         ENDCODEPAGE\n",
    );
    assert!(matches!(result, Err(CodePageError::PrematureEnd { .. })));
}

#[test]
fn missing_section_start_fails_with_premature_end() {
    let result = parse_best_fit("just some text\n0x80 0x20ac\n");
    assert!(matches!(result, Err(CodePageError::PrematureEnd { .. })));
}

#[test]
fn inverted_dbcs_range_is_structural_failure() {
    let result = parse_best_fit(
        "CODEPAGE\n\
         CPINFO 932 0x3f 0xfffd\n\
         DBCSRANGE 1\n\
         0x82 0x81\n",
    );
    assert!(matches!(
        result,
        Err(CodePageError::StructuralFailure { .. })
    ));
}

#[test]
fn oversized_trail_byte_is_structural_failure() {
    let result = parse_best_fit(
        "CODEPAGE\n\
         CPINFO 932 0x3f 0xfffd\n\
         DBCSRANGE 1\n\
         0x81 0x81\n\
         DBCSTABLE 1\n\
         0x140 0x4e00\n",
    );
    assert!(matches!(
        result,
        Err(CodePageError::StructuralFailure { .. })
    ));
}

#[test]
fn zero_count_headers_are_empty_blocks() {
    let tables = parse(
        "CODEPAGE\n\
         CPINFO 1252 0x3f 0xfffd\n\
         MBTABLE 0\n\
         DBCSRANGE 0\n\
         WCTABLE 1\n\
         0x20ac 0x80\n\
         ENDCODEPAGE\n",
    );
    assert_defaults_except(&tables, &[], &[(0x20ac, 0x80)]);
}

#[test]
fn plain_format_fills_both_directions() {
    let tables = parse_plain(
        "# plain mapping file\n\
         0x41 0x0041\n\
         0x80 0x20ac\n\
         not a mapping\n",
        1252,
    );
    assert_eq!(tables.codepage(), 1252);
    assert_eq!(tables.to_unicode(0x41), 0x0041);
    assert_eq!(tables.to_unicode(0x80), 0x20ac);
    assert_eq!(tables.from_unicode(0x20ac), 0x80);
    // No default pair in this format: unmapped entries stay zero.
    assert_eq!(tables.to_unicode(0x33), 0);
    assert_eq!(tables.from_unicode(0x1234), 0);
}

#[test]
fn parser_advances_through_grammar_states() {
    let mut parser = Parser::new();
    assert_eq!(parser.state(), ParseState::Searching);

    parser.feed_line("CODEPAGE").unwrap();
    assert_eq!(parser.state(), ParseState::AwaitingDefault);

    parser.feed_line("CPINFO 1252 0x3f 0xfffd").unwrap();
    assert_eq!(parser.state(), ParseState::AwaitingTable);

    parser.feed_line("MBTABLE 2").unwrap();
    assert_eq!(parser.state(), ParseState::InSingleByteTable { remaining: 2 });

    parser.feed_line("0x80 0x20ac").unwrap();
    assert_eq!(parser.state(), ParseState::InSingleByteTable { remaining: 1 });

    parser.feed_line("0x82 0x201a").unwrap();
    assert_eq!(parser.state(), ParseState::AwaitingTable);

    parser.feed_line("ENDCODEPAGE").unwrap();
    assert_eq!(parser.state(), ParseState::Done);

    let (tables, stats) = parser.finish().unwrap();
    assert_eq!(stats.records_applied, 2);
    assert_eq!(tables.to_unicode(0x82), 0x201a);
}

#[test]
fn classifier_tolerates_trailing_annotations() {
    assert_eq!(
        classify("0x80 0x20ac ;Euro Sign"),
        LineKind::Record {
            first: 0x80,
            second: 0x20ac
        }
    );
    assert_eq!(
        classify("CPINFO 1252 0x3f 0xfffd extra"),
        LineKind::DefaultInfo {
            codepage: 1252,
            default_cp: 0x3f,
            default_uni: 0xfffd
        }
    );
}

#[test]
fn classifier_rejects_overwide_hex_fields() {
    // A field that does not fit 16 bits cannot index the tables; the line
    // must come back unrecognized rather than wrap or truncate.
    assert_eq!(classify("0x10000 0x20ac"), LineKind::Unrecognized);
    assert_eq!(classify("0x80 0x10000"), LineKind::Unrecognized);
}
