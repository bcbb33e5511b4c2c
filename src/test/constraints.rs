use crate::connect::{
    Connector, PairwiseConstraint, exactly_x_connections, self_pair_exactly_x_connections,
};
use crate::error::TopoError;
use crate::tdl::{ComponentId, PortId};

#[test]
fn bipartite_rule_rejects_identical_sides() {
    let mut constraints = Vec::new();
    let a = ComponentId(1);
    assert_eq!(
        exactly_x_connections(&mut constraints, a, a, 1),
        Err(TopoError::DegenerateBipartite(a))
    );
    assert!(constraints.is_empty());

    exactly_x_connections(&mut constraints, a, ComponentId(2), 1).unwrap();
    assert_eq!(constraints.len(), 1);
    assert!(!constraints[0].is_self_pair());
    assert_eq!(constraints[0].participants(), (a, ComponentId(2)));
}

#[test]
fn zero_connections_are_rejected() {
    let mut constraints = Vec::new();
    assert_eq!(
        exactly_x_connections(&mut constraints, ComponentId(0), ComponentId(1), 0),
        Err(TopoError::ZeroConnections)
    );
    assert_eq!(
        self_pair_exactly_x_connections(&mut constraints, ComponentId(0), 0),
        Err(TopoError::ZeroConnections)
    );
    assert!(constraints.is_empty());
}

#[test]
fn pair_counts_per_variant() {
    let bip = PairwiseConstraint::Bipartite {
        a: ComponentId(0),
        b: ComponentId(1),
        connections: 1,
    };
    let selfp = PairwiseConstraint::SelfPair {
        group: ComponentId(2),
        connections: 2,
    };
    assert_eq!(bip.pair_count(3, 4), 12);
    assert_eq!(selfp.pair_count(5, 5), 10);
    assert_eq!(selfp.pair_count(1, 1), 0);
    assert_eq!(selfp.pair_count(0, 0), 0);
    assert_eq!(selfp.connections(), 2);
    assert_eq!(selfp.participants(), (ComponentId(2), ComponentId(2)));
}

#[test]
fn connector_collects_pairs_and_constraints() {
    let g = ComponentId(7);
    let p = PortId(3);
    let mut constraints = Vec::new();
    self_pair_exactly_x_connections(&mut constraints, g, 1).unwrap();

    let mut conn = Connector::new();
    conn.add_component_pair_to_connect(g, g, p, p);
    conn.add_constraints(constraints);

    assert_eq!(conn.pairs().len(), 1);
    assert_eq!(conn.pairs()[0].a, conn.pairs()[0].b);
    assert_eq!(conn.constraints().len(), 1);
    assert!(conn.constraints()[0].is_self_pair());

    let v = serde_json::to_value(&conn).expect("serialize connector");
    assert_eq!(v["constraints"][0]["kind"], "self_pair");
    assert_eq!(v["constraints"][0]["group"], 7);
    assert_eq!(v["pairs"][0]["port_a"], 3);
}
