use std::fs;
use tempfile::TempDir;
use xtract::{ConfigError, Decoder, DecoderConfig, Extract, UntaggedFields};

#[derive(Debug, Default, Extract)]
struct Gap {
    #[xpath("//a")]
    a: String,
    b: String,
    #[xpath("//c")]
    c: String,
}

#[test]
fn config_file_drives_decoder() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("xtract.toml");
    fs::write(
        &path,
        r#"
untagged-fields = "skip"
query-cache-capacity = 4
"#,
    )
    .unwrap();

    let config = DecoderConfig::from_path(&path).unwrap();
    assert_eq!(config.untagged_fields, UntaggedFields::Skip);
    assert_eq!(config.query_cache_capacity, 4);

    let decoder = Decoder::with_config(config);
    let mut gap = Gap::default();
    decoder
        .decode_str("<a>1</a><b>2</b><c>3</c>", &mut gap)
        .unwrap();
    assert_eq!(gap.c, "3");
}

#[test]
fn bad_config_file_names_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "untagged-fields = 3\n").unwrap();

    let err = DecoderConfig::from_path(&path).unwrap_err();
    assert!(matches!(&err, ConfigError::Toml { path: Some(p), .. } if p == &path));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn disabled_cache_still_decodes() {
    #[derive(Debug, Default, Extract)]
    struct Row {
        #[xpath("td")]
        cell: String,
    }

    #[derive(Debug, Default, Extract)]
    struct Table {
        #[xpath("//tr")]
        rows: Vec<Row>,
    }

    let decoder = Decoder::with_config(DecoderConfig::default().with_query_cache_capacity(0));
    let mut table = Table::default();
    decoder
        .decode_str(
            "<table><tr><td>a</td></tr><tr><td>b</td></tr><tr><td>c</td></tr></table>",
            &mut table,
        )
        .unwrap();

    let cells: Vec<_> = table.rows.iter().map(|row| row.cell.as_str()).collect();
    assert_eq!(cells, ["a", "b", "c"]);
}
