#[cfg(test)]
mod path_analysis_tests {
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::{tempdir, TempDir};

    use netsim_analysis::analysis::{analyze_paths, render_text_report, PairFilter, ReportMode};
    use netsim_analysis::input::InputError;
    use netsim_analysis::paths::{Bottleneck, RouteMatrices};
    use netsim_analysis::topology::{
        assign_delays, expand_fanout, find_end_hosts, parse_end_hosts, parse_topology,
        write_end_hosts, write_topology, EndHostSet,
    };

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Three routers in a line (0-1-2), one host per router (3, 4, 5)
    const LINE_TOPOLOGY: &str = "6\n5\n\
        0\t1\t1000\t10\n\
        1\t2\t400\t10\n\
        0\t3\t100\t1\n\
        1\t4\t100\t1\n\
        2\t5\t200\t1\n";

    const LINE_END_HOSTS: &str = "3\n3\t2\t1\n4\t3\t1\n5\t4\t1\n";

    fn load(dir: &TempDir) -> (RouteMatrices, EndHostSet) {
        let topo_path = write_file(dir, "topo.txt", LINE_TOPOLOGY);
        let hosts_path = write_file(dir, "endhosts.txt", LINE_END_HOSTS);

        let topology = parse_topology(&topo_path).unwrap();
        let hosts = parse_end_hosts(&hosts_path).unwrap();
        (RouteMatrices::compute(&topology).unwrap(), hosts)
    }

    #[test]
    fn test_end_to_end_report() {
        let dir = tempdir().unwrap();
        let (matrices, hosts) = load(&dir);

        let analysis = analyze_paths(&matrices, &hosts, &PairFilter::default());
        assert_eq!(analysis.pairs.len(), 6);
        assert_eq!(analysis.unreached_pairs, 0);

        // 3->5 crosses 3-0-1-2-5: delay 1+10+10+1, narrowest link 100
        let far = analysis.pairs.iter().find(|p| p.src == 3 && p.dst == 5).unwrap();
        assert_eq!(far.hops, Some(4));
        assert_eq!(far.delay, Some(22));
        assert_eq!(far.bottleneck, Bottleneck::Limited(100));

        // 4->5 crosses 4-1-2-5: narrowest link 100 on the 4-1 access link
        let near = analysis.pairs.iter().find(|p| p.src == 4 && p.dst == 5).unwrap();
        assert_eq!(near.delay, Some(12));
        assert_eq!(near.bottleneck, Bottleneck::Limited(100));

        let summary = analysis.summary.clone().unwrap();
        assert_eq!(summary.max, 22);
        assert_eq!(summary.min, 12);
        assert_eq!(summary.mean, (12.0 + 22.0 + 12.0 + 12.0 + 22.0 + 12.0) / 6.0);
        assert_eq!(analysis.bottleneck_histogram, BTreeMap::from([(100, 6)]));

        let text = render_text_report(&analysis, &summary, ReportMode::Full);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "3->4:\t12\t100");
        assert_eq!(lines[1], "3->5:\t22\t100");
        assert_eq!(lines[6], "22");
        assert_eq!(lines[7], "12");
        assert_eq!(lines[9], "{100: 6}");
        println!("✓ End-to-end path report matches");
    }

    #[test]
    fn test_router_nodes_never_reported() {
        let dir = tempdir().unwrap();
        let (matrices, hosts) = load(&dir);

        let analysis = analyze_paths(&matrices, &hosts, &PairFilter::default());
        for pair in &analysis.pairs {
            assert!(hosts.contains(pair.src) && hosts.contains(pair.dst));
            assert_ne!(pair.src, pair.dst);
        }
    }

    #[test]
    fn test_malformed_edge_fails_before_relaxation() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "bad.txt", "3\n2\n0\t1\t10\t5\n1\t2\t20\n");

        let err = parse_topology(&path).unwrap_err();
        assert!(matches!(err, InputError::MissingField { line: 4, .. }));
        assert!(err.to_string().contains("bad.txt:4"));
    }

    #[test]
    fn test_topology_pipeline() {
        let dir = tempdir().unwrap();
        // Two routers, each with one host; ids 0..2 are core, 2..4 hosts
        let base = write_file(&dir, "base.txt", "4\n3\n0\t1\t1000\t5\n0\t2\t900\t5\n1\t3\t900\t5\n");
        let topology = parse_topology(&base).unwrap();

        // Extract end hosts and persist them
        let hosts = find_end_hosts(&topology);
        let hosts_path = dir.path().join("endhosts.txt");
        write_end_hosts(&hosts, &hosts_path).unwrap();
        let host_set = parse_end_hosts(&hosts_path).unwrap();
        assert_eq!(host_set.iter().collect::<Vec<_>>(), vec![2, 3]);

        // Access links get delay 1, the core link delay 10
        let delayed = assign_delays(&topology, &host_set, 1, 10);
        let delayed_path = dir.path().join("delayed.txt");
        write_topology(&delayed, &delayed_path).unwrap();

        // Three replicas per host
        let fanout = expand_fanout(&parse_topology(&delayed_path).unwrap(), 3).unwrap();
        assert_eq!(fanout.num_nodes, 8);
        assert_eq!(fanout.links.len(), 7);
        let fanout_path = dir.path().join("fanout.txt");
        write_topology(&fanout, &fanout_path).unwrap();

        let fanout = parse_topology(&fanout_path).unwrap();
        let fanout_hosts: EndHostSet = find_end_hosts(&fanout).iter().collect();
        assert_eq!(fanout_hosts.len(), 6);

        let matrices = RouteMatrices::compute(&fanout).unwrap();
        let filter = PairFilter { exclude_same_site: Some(2) };
        let analysis = analyze_paths(&matrices, &fanout_hosts, &filter);

        // Only cross-router pairs survive: 3 hosts on each side, both directions
        assert_eq!(analysis.pairs.len(), 18);
        let summary = analysis.summary.unwrap();
        assert_eq!(summary.min, 12);
        assert_eq!(summary.max, 12);
        assert_eq!(analysis.bottleneck_histogram, BTreeMap::from([(300, 18)]));
    }

    #[test]
    fn test_missing_end_host_file() {
        let err = parse_end_hosts(Path::new("/nonexistent/endhosts.txt")).unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }
}
