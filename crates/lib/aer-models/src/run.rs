use std::panic;
use std::thread;

use log::info;

use aer_core::config::SimulationConfig;
use aer_core::error::SimResult;
use aer_core::metrics::MetricsRecord;
use aer_core::node::Node;
use aer_core::trace::{EnergyTrace, QosTrace, SecurityLog};

use crate::aggregate::Aggregator;
use crate::energy::EnergyModel;
use crate::qos::QosModel;
use crate::security::SecurityProcess;
use crate::stream::{StreamKind, StreamSeeder};

/// A validated simulation. Building one is the only place a configuration gets rejected.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Generates every trace and reduces them. The security process runs on its own scoped
    /// thread while the node traces are built; it is joined before aggregation.
    pub fn run(&self) -> SimResult<SimulationRun> {
        info!(
            "Simulating {} nodes ({} solar, {} battery) for {} s in steps of {} s",
            self.config.node_count,
            self.config.solar_count(),
            self.config.battery_count(),
            self.config.duration,
            self.config.step_size
        );
        let seeder = StreamSeeder::new(self.config.seed);
        let nodes = self.config.nodes();

        let (node_traces, security) = thread::scope(|s| {
            let security_worker = s.spawn(|| self.security_log(&seeder));
            let node_traces = self.node_traces(&nodes, &seeder);
            match security_worker.join() {
                Ok(security) => (node_traces, security),
                Err(payload) => panic::resume_unwind(payload),
            }
        });
        let security = security?;
        let (energy, qos): (Vec<EnergyTrace>, Vec<QosTrace>) = node_traces.into_iter().unzip();
        info!(
            "Generated {} node traces and {} attacks",
            energy.len(),
            security.total_attacks()
        );

        let metrics = Aggregator::new(&self.config).aggregate(&energy, &qos, &security)?;
        info!("Aggregated metrics: {:?}", metrics);
        Ok(SimulationRun {
            config: self.config,
            nodes,
            energy,
            qos,
            security,
            metrics,
        })
    }

    fn node_traces(&self, nodes: &[Node], seeder: &StreamSeeder) -> Vec<(EnergyTrace, QosTrace)> {
        let energy_model = EnergyModel::new(&self.config);
        let qos_model = QosModel::new(&self.config);
        nodes
            .iter()
            .map(|node| {
                let mut streams = seeder.node_streams(node.id);
                let energy = energy_model.trace(*node, &mut streams);
                let qos = qos_model.trace(&energy, &mut streams.qos);
                (energy, qos)
            })
            .collect()
    }

    fn security_log(&self, seeder: &StreamSeeder) -> SimResult<SecurityLog> {
        let mut stream = seeder.network_stream(StreamKind::Security);
        SecurityProcess::new(self.config.security).run(self.config.time_grid(), &mut stream)
    }
}

/// Everything one run produced. Traces are indexed by node id and only readable.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRun {
    config: SimulationConfig,
    nodes: Vec<Node>,
    energy: Vec<EnergyTrace>,
    qos: Vec<QosTrace>,
    security: SecurityLog,
    metrics: MetricsRecord,
}

impl SimulationRun {
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn energy(&self) -> &[EnergyTrace] {
        &self.energy
    }

    pub fn qos(&self) -> &[QosTrace] {
        &self.qos
    }

    pub fn security(&self) -> &SecurityLog {
        &self.security
    }

    pub fn metrics(&self) -> &MetricsRecord {
        &self.metrics
    }
}
