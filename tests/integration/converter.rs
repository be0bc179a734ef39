use anyhow::Context;
use chrono::NaiveDateTime;
use xtract::{Convert, Error, Extract};

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Default, PartialEq, Extract)]
#[xpath(convert)]
struct Timestamp(Option<NaiveDateTime>);

impl Convert for Timestamp {
    fn convert(&mut self, raw: &[u8]) -> anyhow::Result<()> {
        let text = std::str::from_utf8(raw)?;
        let parsed = NaiveDateTime::parse_from_str(text, FORMAT)
            .with_context(|| format!("`{text}` is not a {FORMAT} timestamp"))?;
        self.0 = Some(parsed);
        Ok(())
    }
}

#[derive(Debug, Default, Extract)]
#[xpath(convert)]
struct Raw(Vec<u8>);

impl Convert for Raw {
    fn convert(&mut self, raw: &[u8]) -> anyhow::Result<()> {
        self.0 = raw.to_vec();
        Ok(())
    }
}

fn expected(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, FORMAT).unwrap()
}

#[test]
fn converter_parses_matched_text() {
    #[derive(Debug, Default, Extract)]
    struct Post {
        #[xpath("//time")]
        published: Timestamp,
        #[xpath("//time/@data-edited")]
        edited: Option<Timestamp>,
    }

    let html = r#"<time data-edited="2023-05-02 08:00:00">2023-05-01 12:34:56</time>"#;
    let post: Post = xtract::from_str(html).unwrap();

    assert_eq!(post.published.0, Some(expected("2023-05-01 12:34:56")));
    assert_eq!(
        post.edited.and_then(|stamp| stamp.0),
        Some(expected("2023-05-02 08:00:00"))
    );
}

#[test]
fn converter_receives_raw_untrimmed_text() {
    #[derive(Debug, Default, Extract)]
    struct Page {
        #[xpath("//code")]
        code: Raw,
        #[xpath("//missing")]
        missing: Raw,
    }

    let page: Page = xtract::from_str("<code> let x = 1;\n</code>").unwrap();

    assert_eq!(page.code.0, b" let x = 1;\n");
    assert_eq!(page.missing.0, b"", "no match converts the empty string");
}

#[test]
fn converter_in_sequence() {
    #[derive(Debug, Default, Extract)]
    struct Log {
        #[xpath("//li/time")]
        entries: Vec<Timestamp>,
    }

    let html = "<ul><li><time>2024-01-01 00:00:00</time></li><li><time>2024-01-02 00:00:00</time></li></ul>";
    let log: Log = xtract::from_str(html).unwrap();

    let entries: Vec<_> = log.entries.into_iter().filter_map(|stamp| stamp.0).collect();
    assert_eq!(
        entries,
        [expected("2024-01-01 00:00:00"), expected("2024-01-02 00:00:00")]
    );
}

#[test]
fn converter_failure_is_a_conversion_error() {
    #[derive(Debug, Default, Extract)]
    struct Post {
        #[xpath("//h1")]
        title: String,
        #[xpath("//time")]
        published: Timestamp,
    }

    let err = xtract::from_str::<Post>("<h1>Hi</h1><time>yesterday</time>").unwrap_err();

    assert_eq!(err.field_path(), Some("published"));
    match err.root_cause() {
        Error::Conversion { expr, text, source } => {
            assert_eq!(expr, "//time");
            assert_eq!(text, "yesterday");
            assert!(source.to_string().contains("yesterday"));
        }
        other => panic!("expected conversion error, got {other:?}"),
    }
}

#[test]
fn converter_as_root() {
    let stamp: Timestamp = xtract::from_str("<p>2020-02-29 23:59:59</p>").unwrap();
    assert_eq!(stamp.0, Some(expected("2020-02-29 23:59:59")));
}
