pub mod evolution_engine;
pub mod genome;
pub mod operators;
pub mod progress;

pub use evolution_engine::{EvolutionEngine, EvolutionOutcome, GenerationRecord};
pub use genome::{decode, distribute, random_genome, DecodedGenome, Genome};
pub use progress::{
    ChannelProgressCallback, ConsoleProgressCallback, ProgressCallback, ProgressMessage,
    SilentProgress,
};
