use xtract::{Decoder, Error, Extract};

#[test]
fn single_text_field() {
    #[derive(Debug, Default, PartialEq, Extract)]
    struct Page {
        #[xpath("//span")]
        field: String,
    }

    let page: Page = xtract::from_str("<span>foo</span>").unwrap();
    assert_eq!(
        page,
        Page {
            field: "foo".to_string()
        }
    );
}

#[test]
fn sequence_of_text_in_document_order() {
    #[derive(Debug, Default, Extract)]
    struct List {
        #[xpath("//li")]
        items: Vec<String>,
    }

    let list: List = xtract::from_str("<ul><li>one</li><li>two</li><li>three</li></ul>").unwrap();
    assert_eq!(list.items, ["one", "two", "three"]);
}

#[test]
fn nested_struct_uses_first_match_as_context() {
    #[derive(Debug, Default, PartialEq, Extract)]
    struct Contact {
        #[xpath(".//td[@class='name']")]
        name: String,
        #[xpath(".//td[@class='email']")]
        email: String,
    }

    #[derive(Debug, Default, Extract)]
    struct Page {
        #[xpath("//div[@class='contact']")]
        contact: Contact,
    }

    let html = r#"
        <td class="name">outside</td>
        <div class="contact">
            <table><tr><td class="name">Ada</td><td class="email">ada@example.com</td></tr></table>
        </div>
        <div class="contact">
            <table><tr><td class="name">Alan</td><td class="email">alan@example.com</td></tr></table>
        </div>
    "#;

    let page: Page = xtract::from_str(html).unwrap();
    assert_eq!(
        page.contact,
        Contact {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    );
}

#[test]
fn sequence_of_structs_applies_field_tags_per_element() {
    #[derive(Debug, Default, PartialEq, Extract)]
    struct Row {
        #[xpath("td[1]")]
        name: String,
        #[xpath("td[2]")]
        age: u8,
    }

    #[derive(Debug, Default, Extract)]
    struct Table {
        #[xpath("//tr")]
        rows: Vec<Row>,
    }

    let html = "<table><tr><td>Ada</td><td>36</td></tr><tr><td>Alan</td><td>41</td></tr></table>";
    let table: Table = xtract::from_str(html).unwrap();

    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].name, "Ada");
    assert_eq!(table.rows[1].age, 41);
}

#[test]
fn unmatched_struct_keeps_default_fields() {
    #[derive(Debug, Default, PartialEq, Extract)]
    struct Inner {
        #[xpath("//span")]
        text: String,
    }

    #[derive(Debug, Default, Extract)]
    struct Outer {
        #[xpath("//section")]
        inner: Inner,
        #[xpath("//section")]
        boxed: Option<Inner>,
        #[xpath("//nav/a")]
        links: Vec<String>,
        #[xpath("//span")]
        after: String,
    }

    let outer: Outer = xtract::from_str("<span>present</span>").unwrap();

    assert_eq!(outer.inner, Inner::default());
    // Optional targets are allocated before the query runs.
    assert_eq!(outer.boxed, Some(Inner::default()));
    assert!(outer.links.is_empty());
    assert_eq!(outer.after, "present");
}

#[test]
fn optional_and_boxed_fields_are_allocated() {
    #[derive(Debug, Default, Extract)]
    struct Page {
        #[xpath("//h1")]
        title: Option<String>,
        #[xpath("//b")]
        count: Box<u32>,
        #[xpath("//li")]
        items: Option<Vec<Box<String>>>,
    }

    let page: Page = xtract::from_str("<h1>Hi</h1><b>0x10</b><li>a</li><li>b</li>").unwrap();

    assert_eq!(page.title.as_deref(), Some("Hi"));
    assert_eq!(*page.count, 16);
    let items: Vec<String> = page.items.unwrap().into_iter().map(|item| *item).collect();
    assert_eq!(items, ["a", "b"]);
}

#[test]
fn untagged_struct_field_is_flattened() {
    #[derive(Debug, Default, Extract)]
    struct Meta {
        #[xpath("//meta[@name='author']/@content")]
        author: String,
    }

    #[derive(Debug, Default, Extract)]
    struct Article {
        meta: Meta,
        #[xpath("//h1")]
        title: String,
    }

    let html = r#"<head><meta name="author" content="Ada"></head><body><h1>Notes</h1></body>"#;
    let article: Article = xtract::from_str(html).unwrap();

    assert_eq!(article.meta.author, "Ada");
    assert_eq!(article.title, "Notes");
}

#[test]
fn explicit_flatten_reads_enclosing_context() {
    #[derive(Debug, Default, Extract)]
    struct Item {
        #[xpath(flatten)]
        text: String,
        #[xpath("@id")]
        id: String,
    }

    #[derive(Debug, Default, Extract)]
    struct Page {
        #[xpath("//li")]
        items: Vec<Item>,
    }

    let page: Page = xtract::from_str(r#"<li id="a">first</li><li id="b">second</li>"#).unwrap();

    assert_eq!(page.items[0].text, "first");
    assert_eq!(page.items[1].id, "b");
}

#[test]
fn skipped_field_is_untouched() {
    #[derive(Debug, Extract)]
    struct Page {
        #[xpath("//h1")]
        title: String,
        #[xpath(skip)]
        source: &'static str,
        #[xpath("//p")]
        body: String,
    }

    let mut page = Page {
        title: String::new(),
        source: "cache",
        body: String::new(),
    };
    Decoder::new()
        .decode_str("<h1>Title</h1><p>Body</p>", &mut page)
        .unwrap();

    assert_eq!(page.title, "Title");
    assert_eq!(page.source, "cache");
    assert_eq!(page.body, "Body");
}

#[test]
fn text_is_not_trimmed() {
    #[derive(Debug, Default, Extract)]
    struct Page {
        #[xpath("//pre")]
        code: String,
    }

    let page: Page = xtract::from_str("<p><span>  two  spaces\tand tab </span></p>").unwrap();
    assert_eq!(page.code, "");

    #[derive(Debug, Default, Extract)]
    struct Spans {
        #[xpath("//span")]
        text: String,
    }

    let spans: Spans = xtract::from_str("<p><span>  two  spaces\tand tab </span></p>").unwrap();
    assert_eq!(spans.text, "  two  spaces\tand tab ");
}

#[test]
fn string_functions_in_tags() {
    #[derive(Debug, Default, Extract)]
    struct Page {
        #[xpath("lower-case(//span[@class='country'])")]
        country: String,
        #[xpath("count(//span)")]
        spans: u32,
        #[xpath("normalize-space(//p)")]
        summary: String,
    }

    let html = r#"<span class="city">Tokyo</span><span class="country">Japan</span><p>  a
        b  </p>"#;
    let page: Page = xtract::from_str(html).unwrap();

    assert_eq!(page.country, "japan");
    assert_eq!(page.spans, 2);
    assert_eq!(page.summary, "a b");
}

#[test]
fn decoding_is_idempotent() {
    #[derive(Debug, Default, PartialEq, Extract)]
    struct Page {
        #[xpath("//h1")]
        title: String,
        #[xpath("//li")]
        items: Vec<String>,
    }

    let html = "<h1>Title</h1><li>a</li><li>b</li>";
    let decoder = Decoder::new();

    let mut first = Page::default();
    decoder.decode_str(html, &mut first).unwrap();
    let mut second = Page::default();
    decoder.decode_str(html, &mut second).unwrap();

    assert_eq!(first, second);
}

#[test]
fn decode_from_reader_and_document() {
    use std::io::{Seek, Write};

    #[derive(Debug, Default, Extract)]
    struct Page {
        #[xpath("//title")]
        title: String,
    }

    let mut file = tempfile::tempfile().expect("tempfile");
    file.write_all(b"<title>From disk</title>").expect("write");
    file.rewind().expect("rewind");

    let page: Page = xtract::from_reader(file).unwrap();
    assert_eq!(page.title, "From disk");

    let document = xtract::HtmlDocument::parse("<title>Parsed once</title>");
    let mut page = Page::default();
    Decoder::new().decode_document(&document, &mut page).unwrap();
    assert_eq!(page.title, "Parsed once");
}

#[test]
fn generic_struct() {
    #[derive(Debug, Default, Extract)]
    struct Labelled<T> {
        #[xpath("//label")]
        label: String,
        #[xpath("//output")]
        value: T,
    }

    let page: Labelled<i32> = xtract::from_str("<label>Total</label><output>-12</output>").unwrap();
    assert_eq!(page.label, "Total");
    assert_eq!(page.value, -12);

    let result = xtract::from_str::<Labelled<u8>>("<output>-12</output>");
    assert!(matches!(
        result.unwrap_err().root_cause(),
        Error::Conversion { .. }
    ));
}
