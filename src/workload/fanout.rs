//! Spread a workload over the replicated hosts of a fanout topology.

use log::info;
use rand::Rng;

use super::trace::Flow;
use super::WorkloadError;
use crate::topology::NodeId;

/// Move each flow endpoint to a random replica of its host.
///
/// Replica `r` of node `n` is `n + r * num_core`, with `r` drawn uniformly
/// from `[0, fanout)` independently for the source and the destination.
pub fn expand_workload_fanout<R: Rng>(
    flows: &[Flow],
    fanout: u32,
    num_core: u32,
    rng: &mut R,
) -> Result<Vec<Flow>, WorkloadError> {
    if fanout == 0 {
        return Err(WorkloadError::ZeroFanout);
    }

    let mut replica = |node: NodeId| -> Result<NodeId, WorkloadError> {
        let r: u32 = rng.gen_range(0..fanout);
        let offset = r as u64 * num_core as u64;
        u32::try_from(node as u64 + offset).map_err(|_| WorkloadError::Overflow { node, offset })
    };

    let expanded = flows
        .iter()
        .map(|flow| -> Result<Flow, WorkloadError> {
            Ok(Flow {
                src: replica(flow.src)?,
                dst: replica(flow.dst)?,
                ..flow.clone()
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!("Spread {} flows over fanout {}", expanded.len(), fanout);
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn flows() -> Vec<Flow> {
        (0..50)
            .map(|i| Flow {
                start_time: (i as f64 * 0.1).into(),
                size: 1000 + i,
                src: (i % 5) as u32,
                dst: ((i + 1) % 5) as u32,
            })
            .collect()
    }

    #[test]
    fn test_endpoints_land_on_replicas() {
        let mut rng = StdRng::seed_from_u64(7);
        let original = flows();
        let expanded = expand_workload_fanout(&original, 4, 5, &mut rng).unwrap();

        assert_eq!(expanded.len(), original.len());
        for (before, after) in original.iter().zip(&expanded) {
            assert_eq!(after.start_time, before.start_time);
            assert_eq!(after.size, before.size);
            assert_eq!(after.src % 5, before.src);
            assert_eq!(after.dst % 5, before.dst);
            assert!(after.src < 20 && after.dst < 20);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let a = expand_workload_fanout(&flows(), 3, 5, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = expand_workload_fanout(&flows(), 3, 5, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fanout_one_is_identity() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(expand_workload_fanout(&flows(), 1, 5, &mut rng).unwrap(), flows());
    }

    #[test]
    fn test_zero_fanout_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            expand_workload_fanout(&flows(), 0, 5, &mut rng),
            Err(WorkloadError::ZeroFanout)
        ));
    }
}
