use stmt_stream::{Statement, StmtError, Value, parse_channel, parse_chunked};
use test_case::test_case;

const SIMPLE: &str = "print \"hello\"; let x = 42;";
const LONG_STRING: &str = "print \"\"\"This is a\nmulti-line\nstring\"\"\";";

#[test]
fn simple_program() {
    let statements = parse_chunked(SIMPLE.as_bytes(), 1024).unwrap();
    insta::assert_debug_snapshot!(statements, @r#"
    [
        Print(
            Str(
                "hello",
            ),
        ),
        Let {
            name: "x",
            value: Number(
                42,
            ),
        },
    ]
    "#);
}

#[test_case(1; "one byte chunks")]
#[test_case(5; "small chunks")]
#[test_case(13; "split mid statement")]
fn simple_program_chunked(chunk_size: usize) {
    assert_eq!(
        parse_chunked(SIMPLE.as_bytes(), chunk_size),
        parse_chunked(SIMPLE.as_bytes(), SIMPLE.len())
    );
}

#[test]
fn long_string_in_small_chunks() {
    let statements = parse_chunked(LONG_STRING.as_bytes(), 10).unwrap();
    assert_eq!(
        statements,
        vec![Statement::Print(Value::Str(
            "This is a\nmulti-line\nstring".into()
        ))]
    );
}

#[test]
fn every_chunk_size_gives_same_result() {
    let input = format!("{SIMPLE}\n{LONG_STRING}\nlet _y2 = -17; print _y2; print \"\";");
    let expected = parse_chunked(input.as_bytes(), input.len()).unwrap();
    assert_eq!(expected.len(), 6);

    for chunk_size in 1..=input.len() {
        assert_eq!(
            parse_chunked(input.as_bytes(), chunk_size).as_ref(),
            Ok(&expected),
            "chunk size {chunk_size}"
        );
    }
}

#[test]
fn multibyte_text_split_everywhere() {
    let input = "let greeting = \"grüße, 世界\";";
    for chunk_size in 1..=8 {
        assert_eq!(
            parse_chunked(input.as_bytes(), chunk_size),
            Ok(vec![Statement::Let {
                name: "greeting".into(),
                value: Value::Str("grüße, 世界".into()),
            }])
        );
    }
}

#[test_case("print 1 print 2;", "expected `;`, found `print`"; "missing semicolon")]
#[test_case("let = 3;", "expected identifier, found `=`"; "missing name")]
#[test_case("x;", "expected `print` or `let`, found identifier"; "bare value")]
fn syntax_errors(input: &str, message: &str) {
    for chunk_size in [1, 3, 64] {
        assert_eq!(
            parse_chunked(input.as_bytes(), chunk_size),
            Err(StmtError::Syntax(message.into()))
        );
    }
}

#[test_case(b"x; \xff"; "bad byte after statement start")]
#[test_case(b"print 1; print \"a\xffb\";"; "bad byte inside string")]
#[test_case(b"let y = 2; \xc3"; "truncated character")]
#[test_case(b"print 1 @ \xff"; "invalid token then bad byte")]
fn invalid_input_fails_the_same_for_every_chunk_size(input: &[u8]) {
    let whole = parse_chunked(input, input.len());
    assert!(whole.is_err());

    for chunk_size in 1..input.len() {
        assert_eq!(
            parse_chunked(input, chunk_size),
            whole,
            "chunk size {chunk_size}"
        );
    }
}

#[test]
fn statement_before_bad_byte_is_seen_first() {
    assert_eq!(
        parse_chunked(b"x; \xff", 64),
        Err(StmtError::Syntax(
            "expected `print` or `let`, found identifier".into()
        ))
    );
    assert_eq!(
        parse_chunked(b"print 1; \xff", 64),
        Err(StmtError::InvalidUtf8 { offset: 9 })
    );
}

#[test]
fn unterminated_long_string() {
    assert_eq!(
        parse_chunked(b"print \"\"\"open", 4),
        Err(StmtError::UnterminatedString { offset: 6 })
    );
}

#[test]
fn error_messages() {
    insta::assert_snapshot!(
        StmtError::UnterminatedString { offset: 6 },
        @"unterminated string starting at byte 6"
    );
    insta::assert_snapshot!(StmtError::UnexpectedEof, @"input ended inside a statement");
}

#[tokio::test]
async fn channel_source() {
    let (tx, rx) = tokio::sync::mpsc::channel::<Vec<u8>>(4);

    let sender = tokio::spawn(async move {
        for chunk in SIMPLE.as_bytes().chunks(3) {
            if tx.send(chunk.to_vec()).await.is_err() {
                break;
            }
        }
    });

    let statements = parse_channel(rx).await.unwrap();
    sender.await.unwrap();

    assert_eq!(statements.len(), 2);
    assert_eq!(statements[1], Statement::Let {
        name: "x".into(),
        value: Value::Number(42),
    });
}
