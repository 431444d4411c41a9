// Test fixtures with known RMH documents and expected outputs
// WHY: Golden-file testing requires deterministic input/output pairs for validation

/// Identifier carried by the fixture documents
pub const NEWS_ID: &str = "IGC-News1-mbl_2019-0001";

/// Small news article in the RMH layout: header with idno and sourceDesc,
/// body split into div1 > p > s > w/c
pub const NEWS_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0" xml:lang="is">
  <teiHeader>
    <fileDesc>
      <titleStmt><title>Hún fór heim</title></titleStmt>
      <publicationStmt>
        <distributor>Stofnun Árna Magnússonar</distributor>
        <idno type="RMH">IGC-News1-mbl_2019-0001</idno>
      </publicationStmt>
    </fileDesc>
    <sourceDesc>
      <bibl><title>Hún fór heim</title><publisher>Morgunblaðið</publisher><date>2019-05-02</date></bibl>
    </sourceDesc>
  </teiHeader>
  <text>
    <body>
      <div1 n="1">
        <p n="1">
          <s n="1"><w lemma="hún" type="fn">Hún</w><w lemma="fara" type="so">fór</w></s>
          <s n="2"><w lemma="heim" type="aa">heim</w><c>.</c></s>
        </p>
        <p n="2">
          <s n="1"><w lemma="það" type="fp">Það</w><w lemma="vera" type="so">var</w><w lemma="kaldur" type="lo">kalt</w><c type="pl">!</c></s>
        </p>
      </div1>
    </body>
  </text>
</TEI>
"#;

/// Expected `rmh` output for NEWS_DOCUMENT
/// Format: index<TAB>text
pub const NEWS_EXPECTED: &str = "IGC-News1-mbl_2019-0001.1.1\tHún fór
IGC-News1-mbl_2019-0001.1.2\theim .
IGC-News1-mbl_2019-0001.2.1\tÞað var kalt !";

/// Document with a body but no identifier anywhere
pub const NO_IDNO_DOCUMENT: &str = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <teiHeader><fileDesc/></teiHeader>
  <text><body><div1><p n="1"><s n="1"><w>Halló</w></s></p></div1></body></text>
</TEI>
"#;

/// Truncated document, not well-formed
pub const TRUNCATED_DOCUMENT: &str = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <teiHeader><idno>IGC-Broken-1</idno></teiHeader>
  <text><body><div1><p n="1"><s n="1"><w>Hal"#;
