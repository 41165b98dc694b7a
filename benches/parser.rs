#[macro_use]
extern crate bencher;

use bencher::Bencher;

fn graphql_ast_parse_graphql_query_doc(bench: &mut Bencher) {
    use graphql_query_doc::ast::*;
    bench.iter(|| {
        let ctx = ASTContext::new();
        Document::parse(&ctx, QUERY).ok();
    });
}

fn graphql_ast_parse_async_graphql_parser(bench: &mut Bencher) {
    use async_graphql_parser::parse_query;
    bench.iter(|| {
        parse_query::<&str>(QUERY).ok();
    });
}

fn graphql_ast_parse_graphql_parser(bench: &mut Bencher) {
    use graphql_parser::query::parse_query;
    bench.iter(|| {
        parse_query::<&str>(QUERY).ok();
    });
}

fn graphql_ast_parse_apollo_parser(bench: &mut Bencher) {
    use apollo_parser::Parser;
    bench.iter(|| {
        let parser = Parser::new(QUERY);
        let cst = parser.parse();
        cst.document();
    });
}

fn graphql_ast_print_graphql_query_doc(bench: &mut Bencher) {
    use graphql_query_doc::ast::*;
    let ctx = ASTContext::new();
    let ast = Document::parse(&ctx, QUERY).unwrap();
    bench.iter(|| ast.print());
}

fn graphql_ast_print_gql_parser(bench: &mut Bencher) {
    use graphql_parser::query::parse_query;
    let ast = parse_query::<&str>(QUERY).ok().unwrap();
    bench.iter(|| ast.to_string());
}

fn graphql_ast_print_apollo_parser(bench: &mut Bencher) {
    use apollo_parser::cst::CstNode;
    use apollo_parser::Parser;
    let parser = Parser::new(QUERY);
    let cst = parser.parse();
    let doc = cst.document();
    bench.iter(|| doc.source_string());
}

fn graphql_ast_export_json(bench: &mut Bencher) {
    use graphql_query_doc::ast::*;
    use graphql_query_doc::json::ToJson;
    let ctx = ASTContext::new();
    let ast = Document::parse(&ctx, QUERY).unwrap();
    bench.iter(|| ast.to_json());
}

fn graphql_ast_parse_kitchen_sink(bench: &mut Bencher) {
    use graphql_query_doc::ast::*;
    bench.iter(|| {
        let ctx = ASTContext::new();
        Document::parse(&ctx, KITCHEN_SINK).ok();
    });
}

benchmark_group!(
    parse,
    graphql_ast_parse_graphql_query_doc,
    graphql_ast_parse_async_graphql_parser,
    graphql_ast_parse_graphql_parser,
    graphql_ast_parse_apollo_parser,
    graphql_ast_print_graphql_query_doc,
    graphql_ast_print_gql_parser,
    graphql_ast_print_apollo_parser,
    graphql_ast_export_json,
    graphql_ast_parse_kitchen_sink
);

benchmark_main!(parse);

static QUERY: &str = include_str!("../fixture/introspection.graphql");
static KITCHEN_SINK: &str = include_str!("../fixture/kitchen_sink.graphql");
