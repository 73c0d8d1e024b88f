//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::align::{AlignKind, BorderMode};
use crate::geometry::Axis;
use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse script source code into an AST
pub fn parse(input: &str) -> Result<Script, Vec<crate::ParseError>> {
    let len = input.len();

    // Create a logos lexer and convert to token stream
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    script_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn script_parser<'a, I>() -> impl Parser<'a, I, Script, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    // Selectors: `#id`, `.class` or a bare tag, comma separated
    let selector = select! {
        Token::IdSelector(s) => SelectorExpr::Id(s),
        Token::ClassSelector(s) => SelectorExpr::Class(s),
        Token::Ident(s) => SelectorExpr::Tag(s),
    }
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    let selector_list = selector
        .separated_by(just(Token::Comma))
        .at_least(1)
        .collect::<Vec<_>>()
        .map_with(|items, e| Spanned::new(SelectorList(items), span_range(&e.span())));

    // `vertical` is accepted as a synonym of `middle`
    let align_kind = select! {
        Token::Top => AlignKind::Top,
        Token::Bottom => AlignKind::Bottom,
        Token::Left => AlignKind::Left,
        Token::Right => AlignKind::Right,
        Token::Center => AlignKind::Center,
        Token::Middle => AlignKind::Middle,
        Token::Vertical => AlignKind::Middle,
    }
    .map_with(|k, e| Spanned::new(k, span_range(&e.span())));

    let axis = select! {
        Token::Horizontal => Axis::Horizontal,
        Token::Vertical => Axis::Vertical,
    }
    .map_with(|a, e| Spanned::new(a, span_range(&e.span())));

    let handler = select! {
        Token::Ident(s) => HandlerRef::Named(Identifier::new(s)),
        Token::String(s) => HandlerRef::String(s),
        Token::Number(n) => HandlerRef::Number(n),
    }
    .map_with(|h, e| Spanned::new(h, span_range(&e.span())));

    let then_clause = just(Token::Then).ignore_then(handler).or_not();

    let border_clause = just(Token::Border)
        .ignore_then(just(Token::Colon))
        .ignore_then(select! {
            Token::Include => BorderMode::Include,
            Token::Exclude => BorderMode::Exclude,
        })
        .or_not();

    // Gap stays raw text; the distribution operation decides what is valid
    let gap_value = select! {
        Token::Number(n) => n,
        Token::String(s) => s,
        Token::Ident(s) => s,
    }
    .map_with(|g, e| Spanned::new(g, span_range(&e.span())));

    // align <kind> <selectors> [then <handler>]
    let align_cmd = just(Token::Align)
        .ignore_then(align_kind.clone())
        .then(selector_list.clone())
        .then(then_clause.clone())
        .map(|((kind, targets), then)| Command::Align {
            kind,
            targets,
            then,
        });

    // canvas <kind> <selectors> to <selectors> [border: <mode>] [then <handler>]
    let canvas_cmd = just(Token::Canvas)
        .ignore_then(align_kind)
        .then(selector_list.clone())
        .then_ignore(just(Token::To))
        .then(selector_list.clone())
        .then(border_clause)
        .then(then_clause.clone())
        .map(
            |((((kind, targets), canvas), border), then)| Command::Canvas {
                kind,
                targets,
                canvas,
                border,
                then,
            },
        );

    // distribute <axis> <selectors> gap <value> [then <handler>]
    let distribute_cmd = just(Token::Distribute)
        .ignore_then(axis)
        .then(selector_list)
        .then_ignore(just(Token::Gap))
        .then(gap_value)
        .then(then_clause)
        .map(|(((axis, targets), gap), then)| Command::Distribute {
            axis,
            targets,
            gap,
            then,
        });

    let command = choice((align_cmd, canvas_cmd, distribute_cmd))
        .map_with(|c, e| Spanned::new(c, span_range(&e.span())))
        .then_ignore(just(Token::Semicolon).or_not());

    // Script is a list of commands
    command
        .repeated()
        .collect()
        .then_ignore(end())
        .map(|commands| Script { commands })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(input: &str) -> Command {
        let script = parse(input).expect("Should parse");
        assert_eq!(script.commands.len(), 1);
        script.commands.into_iter().next().unwrap().node
    }

    #[test]
    fn test_parse_align() {
        match single("align top .card") {
            Command::Align {
                kind,
                targets,
                then,
            } => {
                assert_eq!(kind.node, AlignKind::Top);
                assert_eq!(
                    targets.node.0[0].node,
                    SelectorExpr::Class("card".to_string())
                );
                assert!(then.is_none());
            }
            other => panic!("Expected align, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_vertical_alias() {
        match single("align vertical #a, #b") {
            Command::Align { kind, targets, .. } => {
                assert_eq!(kind.node, AlignKind::Middle);
                assert_eq!(targets.node.0.len(), 2);
            }
            other => panic!("Expected align, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_canvas_with_border_and_handler() {
        match single("canvas center #logo, img to #page border: exclude then log") {
            Command::Canvas {
                kind,
                targets,
                canvas,
                border,
                then,
            } => {
                assert_eq!(kind.node, AlignKind::Center);
                assert_eq!(
                    targets.node.0[1].node,
                    SelectorExpr::Tag("img".to_string())
                );
                assert_eq!(canvas.node.0[0].node, SelectorExpr::Id("page".to_string()));
                assert_eq!(border, Some(BorderMode::Exclude));
                assert_eq!(
                    then.unwrap().node,
                    HandlerRef::Named(Identifier::new("log"))
                );
            }
            other => panic!("Expected canvas, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_distribute_gap_forms() {
        for (source, expected) in [
            ("distribute horizontal .item gap 8", "8"),
            ("distribute horizontal .item gap -3", "-3"),
            ("distribute vertical .item gap 12px", "12px"),
            (r#"distribute vertical .item gap "wide""#, "wide"),
            ("distribute vertical .item gap auto", "auto"),
        ] {
            match single(source) {
                Command::Distribute { gap, .. } => assert_eq!(gap.node, expected),
                other => panic!("Expected distribute, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_literal_handler() {
        match single(r#"align left .a then "done""#) {
            Command::Align { then, .. } => {
                let handler = then.unwrap().node;
                assert_eq!(handler, HandlerRef::String("done".to_string()));
                assert_eq!(handler.describe(), "string \"done\"");
            }
            other => panic!("Expected align, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_multiple_commands_with_comments() {
        let input = r#"
            // line up the cards first
            align top .card;
            distribute horizontal .card gap 10 then print
            /* then center the group */
            canvas center .card to #page
        "#;
        let script = parse(input).expect("Should parse");
        assert_eq!(script.commands.len(), 3);
        assert!(matches!(script.commands[1].node, Command::Distribute { .. }));
        assert!(matches!(script.commands[2].node, Command::Canvas { .. }));
    }

    #[test]
    fn test_command_spans() {
        let input = "align top #a\nalign left #b";
        let script = parse(input).expect("Should parse");
        assert_eq!(script.commands[0].span, 0..12);
        assert_eq!(&input[script.commands[1].span.clone()], "align left #b");
    }

    #[test]
    fn test_command_display() {
        let input = "canvas vertical #a, .b to #page border: include then log";
        let script = parse(input).expect("Should parse");
        assert_eq!(
            script.commands[0].node.to_string(),
            "canvas middle #a, .b to #page border: include then log"
        );
    }

    #[test]
    fn test_empty_script() {
        let script = parse("// nothing to do").expect("Should parse");
        assert!(script.commands.is_empty());
    }

    #[test]
    fn test_missing_selector_is_error() {
        let errors = parse("align top then log").unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_canvas_requires_to() {
        assert!(parse("canvas left #a #page").is_err());
    }

    #[test]
    fn test_distribute_rejects_edge_kind() {
        assert!(parse("distribute left .a gap 4").is_err());
    }
}
