pub mod encode;
pub mod collapse;
pub mod assembler;
pub mod registry;
pub mod american;

pub use collapse::{collapse, segment_runs, MAX_LAYOVER_MINUTES};
pub use assembler::{UrlAssembler, METASEARCH_BASE};
pub use registry::{LinkContext, LinkOutput, LinkProducer, LinkRegistry, RegisteredLink, AIRLINES};
pub use american::AmericanLink;
