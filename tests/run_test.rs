//! End-to-end tests of the library entry point and the tree service

use rstest::rstest;

use ntree::application::services::TreeService;
use ntree::config::Settings;
use ntree::domain::FrontierOrder;
use ntree::infrastructure::di::ServiceContainer;
use ntree::infrastructure::render::RenderFormat;
use ntree::util::testing;

const REFERENCE_OUTPUT: &str = "\
1 3
2 3
3 4
4 4
5 4
6 4
7 4
8 4
9 5
10 5
11 5
12 5
13 5
14 5
15 5
16 5
17 5
18 5
19 5
20 5
21 5
22 5
23 5
24 5
25 5
5
";

#[test]
fn given_25_nodes_when_run_then_output_matches_reference() {
    testing::init_test_setup();
    let mut out = Vec::new();
    let longest = ntree::run(25, &mut out).expect("run");
    assert_eq!(longest, 5);
    assert_eq!(String::from_utf8(out).unwrap(), REFERENCE_OUTPUT);
}

#[rstest]
#[case(1, "1 0\n0\n")]
#[case(2, "1 1\n2 1\n1\n")]
#[case(3, "1 1\n2 2\n3 2\n2\n")]
fn given_small_trees_when_run_then_output_is_exact(#[case] n: usize, #[case] expected: &str) {
    let mut out = Vec::new();
    ntree::run(n, &mut out).expect("run");
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn given_zero_nodes_when_run_then_nothing_is_written() {
    let mut out = Vec::new();
    let err = ntree::run(0, &mut out).unwrap_err();
    assert!(err.to_string().contains("invalid node count"));
    assert!(out.is_empty());
}

#[test]
fn given_edge_renderer_when_run_then_edges_precede_report() {
    let settings = Settings {
        nodes: 5,
        render: RenderFormat::Edges,
        ..Default::default()
    };
    let service = ServiceContainer::new(settings).tree_service();
    let mut out = Vec::new();
    service.run(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "1 2\n1 3\n1 4\n1 5\n1 1\n2 2\n3 2\n4 2\n5 2\n2\n"
    );
}

#[test]
fn given_lifo_settings_when_draw_dot_then_spine_edges_present() {
    let settings = Settings {
        frontier: FrontierOrder::Lifo,
        ..Default::default()
    };
    let service = TreeService::new(settings, RenderFormat::Dot.renderer());
    let mut out = Vec::new();
    let tree = service.draw(&mut out).unwrap();
    let dot = String::from_utf8(out).unwrap();
    assert_eq!(tree.edge_count(), 24);
    assert!(dot.contains("  20 -- 23;"));
    assert_eq!(dot.matches(" -- ").count(), 24);
}
