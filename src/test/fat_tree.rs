use crate::connect::PairwiseConstraint;
use crate::error::TopoError;
use crate::tdl::{ComponentKind, PortSpeed};
use crate::topo::fat_tree::{FatTreeOpts, FatTreeSizing, build_fat_tree};

#[test]
fn fat_tree_sizing_from_pods() {
    assert_eq!(
        FatTreeSizing::from_pods(4),
        FatTreeSizing {
            ports_per_switch: 4,
            switches_per_layer_per_pod: 2,
            num_spine_switches: 4,
        }
    );
    let s = FatTreeSizing::from_pods(8);
    assert_eq!(s.switches_per_layer_per_pod, 4);
    assert_eq!(s.num_spine_switches, 16);
    // odd pod counts truncate
    assert_eq!(FatTreeSizing::from_pods(5).switches_per_layer_per_pod, 2);
}

#[test]
fn fat_tree_k4_pods_and_spines() {
    let topo = build_fat_tree(&FatTreeOpts { num_pods: 4 }).expect("build fat tree");
    let g = &topo.graph;

    assert_eq!(g.component(topo.root).name, "fattree");
    assert_eq!(g.child_count(topo.root, topo.pod), 4);
    assert_eq!(g.child_count(topo.root, topo.spine_switch), 4);
    assert_eq!(g.child_count(topo.pod, topo.agg_switch), 2);
    assert_eq!(g.child_count(topo.pod, topo.tor_switch), 2);

    for (sw, port, name) in [
        (topo.agg_switch, topo.agg_port, "agg-sw"),
        (topo.tor_switch, topo.tor_port, "tor-sw"),
        (topo.spine_switch, topo.spine_port, "spine-sw"),
    ] {
        assert_eq!(g.component(sw).name, name);
        assert_eq!(g.component(sw).kind, ComponentKind::Switch);
        assert_eq!(g.child_count(sw, port), 4);
        assert_eq!(g.port(port).name, "port40GE-");
        assert_eq!(g.port(port).speed, Some(PortSpeed::FortyGbps));
    }

    let s = g.summarize(topo.root);
    assert_eq!(s.switches, 4 + 4 * 4);
    assert_eq!(s.hosts, 0);
    assert_eq!(s.connectors, 2);
    assert_eq!(s.links, 16 + 16);
}

#[test]
fn fat_tree_connectors_are_bipartite() {
    let topo = build_fat_tree(&FatTreeOpts { num_pods: 6 }).expect("build fat tree");
    let g = &topo.graph;

    let pod_conns = g.connectors(topo.pod);
    assert_eq!(pod_conns.len(), 1);
    assert_eq!(
        pod_conns[0].constraints(),
        &[PairwiseConstraint::Bipartite {
            a: topo.agg_switch,
            b: topo.tor_switch,
            connections: 1
        }]
    );

    let top_conns = g.connectors(topo.root);
    assert_eq!(top_conns.len(), 1);
    // rule names the spine first, wiring names the pod first
    assert_eq!(
        top_conns[0].constraints(),
        &[PairwiseConstraint::Bipartite {
            a: topo.spine_switch,
            b: topo.pod,
            connections: 1
        }]
    );
    let pair = top_conns[0].pairs()[0];
    assert_eq!(pair.a, topo.pod);
    assert_eq!(pair.b, topo.spine_switch);
    // pod side lands on an aggregation switch port
    assert_eq!(pair.port_a, topo.agg_port);
    assert_eq!(pair.port_b, topo.spine_port);
    assert!(top_conns[0].constraints().iter().all(|c| !c.is_self_pair() && c.connections() == 1));

    assert_eq!(g.required_links(topo.root), 6 * 9 + 6 * 9);
}

#[test]
fn fat_tree_counts_for_even_pods() {
    for num_pods in (2..=12_u64).step_by(2) {
        let topo = build_fat_tree(&FatTreeOpts { num_pods }).expect("build fat tree");
        let g = &topo.graph;
        let half = num_pods / 2;
        assert_eq!(g.instance_count(topo.root, topo.pod), num_pods);
        assert_eq!(g.instance_count(topo.root, topo.agg_switch), num_pods * half);
        assert_eq!(g.instance_count(topo.root, topo.tor_switch), num_pods * half);
        assert_eq!(g.instance_count(topo.root, topo.spine_switch), half * half);
    }
}

#[test]
fn fat_tree_rejects_odd_or_tiny_pod_counts() {
    for num_pods in [0_u64, 1, 3, 7] {
        assert!(matches!(
            build_fat_tree(&FatTreeOpts { num_pods }),
            Err(TopoError::InvalidParameter { name: "num_pods", .. })
        ));
    }
}

#[test]
fn fat_tree_reports_spine_overflow() {
    // (2^33)^2 spine switches do not fit in a u64
    assert!(matches!(
        build_fat_tree(&FatTreeOpts { num_pods: 1 << 34 }),
        Err(TopoError::Overflow { .. })
    ));
    assert!(matches!(
        FatTreeSizing::checked_from_pods(1 << 34),
        Err(TopoError::Overflow { .. })
    ));
}

#[test]
fn fat_tree_reports_overflow_in_topology_totals() {
    // 2^42 spines fit, but pods * spines = 2^64 links do not
    let num_pods = 1_u64 << 22;
    assert_eq!(FatTreeSizing::from_pods(num_pods).num_spine_switches, 1 << 42);
    assert!(matches!(
        build_fat_tree(&FatTreeOpts { num_pods }),
        Err(TopoError::Overflow { .. })
    ));

    // largest sizes still in range build normally
    let sizing = FatTreeSizing::checked_from_pods(1 << 20).expect("2^20 pods fit");
    assert_eq!(sizing.num_spine_switches, 1 << 38);
    assert_eq!(sizing, FatTreeSizing::from_pods(1 << 20));
}
