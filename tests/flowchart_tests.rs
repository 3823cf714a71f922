use pretty_assertions::assert_eq;
use simflow::flowchart::{display_context, generate_dot, DotConfig};
use simflow::graph::{extract_shared_stacks, resolve_timestamps, EdgePolicy, SchedulingGraph};
use simflow::parser::parse_trace;
use simflow::utils::config::TraceSettings;

fn render(raw: &str, policy: EdgePolicy) -> String {
    let parsed = parse_trace(raw, &TraceSettings::default()).unwrap();
    let graph = SchedulingGraph::from_events(&parsed.events, policy);
    let stacks = extract_shared_stacks(&graph);
    let timestamps = resolve_timestamps(&graph);
    generate_dot(&graph, &stacks, &timestamps, None)
}

const TRACE: &str = "\
SimulationTime
E 1000000000 id 1 id 2 id 2000000000
#Simulator::Schedule
#Client::Send
#main

E 1500000000 id 1 id 3 id 2500000000
#Simulator::Schedule
#Client::Retry
#main

E 2000000000 id 2 id 4 id 3000000000
#Simulator::Schedule
#Server::Reply
#Server::Recv

";

#[test]
fn test_display_context_skips_scheduler_frames() {
    let shared = ["Scheduler::Schedule", "main"];
    assert_eq!(display_context(&shared, "Schedule"), "main");
}

#[test]
fn test_full_pipeline() {
    let dot = render(TRACE, EdgePolicy::LastWins);

    assert_eq!(
        dot,
        "digraph sim {\n\
         1 [label=\"Timestamp=1.000000s, Shared Stack=main\"];\n\
         2 [label=\"Timestamp=2.000000s, Shared Stack=Server::Reply\"];\n\
         3 [label=\"Timestamp=2.500000s, Shared Stack=\"];\n\
         4 [label=\"Timestamp=3.000000s, Shared Stack=\"];\n\
         1 -> 2 [label=\"Delay=1.000000, Stack=Client::Send\"];\n\
         1 -> 3 [label=\"Delay=1.500000, Stack=Client::Retry\"];\n\
         2 -> 4 [label=\"Delay=1.000000, Stack=\"];\n\
         }\n"
    );
}

#[test]
fn test_node_statements_precede_edges() {
    let dot = render(TRACE, EdgePolicy::LastWins);
    let last_node = dot.rfind("[label=\"Timestamp").unwrap();
    let first_edge = dot.find("->").unwrap();
    assert!(last_node < first_edge);
    assert!(dot.starts_with("digraph sim {\n"));
    assert!(dot.ends_with("\n}\n"));
}

#[test]
fn test_duplicate_pairs_by_policy() {
    let raw = "\
SimulationTime
E 100 id 1 id 2 id 500
#first

E 300 id 1 id 2 id 500
#second

";
    let last_wins = render(raw, EdgePolicy::LastWins);
    assert_eq!(last_wins.matches("1 -> 2").count(), 1);
    assert!(last_wins.contains("Shared Stack=second"));

    let keep_all = render(raw, EdgePolicy::KeepAll);
    assert_eq!(keep_all.matches("1 -> 2").count(), 2);
    assert!(keep_all.contains("Stack=first"));
    assert!(keep_all.contains("Stack=second"));
}

#[test]
fn test_custom_graph_name() {
    let parsed = parse_trace(TRACE, &TraceSettings::default()).unwrap();
    let graph = SchedulingGraph::from_events(&parsed.events, EdgePolicy::LastWins);
    let stacks = extract_shared_stacks(&graph);
    let timestamps = resolve_timestamps(&graph);

    let config = DotConfig::new().with_graph_name("flow");
    let dot = generate_dot(&graph, &stacks, &timestamps, Some(&config));
    assert!(dot.starts_with("digraph flow {\n"));
}
