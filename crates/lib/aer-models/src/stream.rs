use rand::Rng;
use rand_distr::{Distribution, Uniform};
use rand_pcg::Pcg64;

use aer_core::node::NodeId;

/// What a random stream is used for. Every purpose draws from its own stream, so the number of
/// variates one model consumes never shifts the variates another model sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Drain,
    Harvest,
    Qos,
    Security,
}

impl StreamKind {
    fn offset(&self) -> u128 {
        match self {
            StreamKind::Drain => 0,
            StreamKind::Harvest => 1,
            StreamKind::Qos => 2,
            StreamKind::Security => 3,
        }
    }
}

const STREAMS_PER_NODE: u128 = 3;
const NETWORK_STREAM_BASE: u128 = 1 << 64;

/// Derives independent PCG streams from one root seed. Node streams are partitioned by node id
/// and purpose; network-wide streams live above every node stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSeeder {
    seed: u64,
}

impl StreamSeeder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn node_stream(&self, node_id: NodeId, kind: StreamKind) -> RngStream {
        let stream = node_id.as_u64() as u128 * STREAMS_PER_NODE + kind.offset();
        RngStream::new(self.seed, stream)
    }

    pub fn network_stream(&self, kind: StreamKind) -> RngStream {
        RngStream::new(self.seed, NETWORK_STREAM_BASE + kind.offset())
    }

    pub fn node_streams(&self, node_id: NodeId) -> NodeStreams {
        NodeStreams {
            drain: self.node_stream(node_id, StreamKind::Drain),
            harvest: self.node_stream(node_id, StreamKind::Harvest),
            qos: self.node_stream(node_id, StreamKind::Qos),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RngStream {
    rng: Pcg64,
}

impl RngStream {
    fn new(seed: u64, stream: u128) -> Self {
        Self {
            rng: Pcg64::new(seed as u128, stream),
        }
    }

    /// A variate in `[min, max]`. Always consumes exactly one draw, even for an empty range.
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        Uniform::new_inclusive(min, max).sample(&mut self.rng)
    }

    /// A variate in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// The streams owned by one node while its traces are generated.
#[derive(Debug, Clone)]
pub struct NodeStreams {
    pub drain: RngStream,
    pub harvest: RngStream,
    pub qos: RngStream,
}
