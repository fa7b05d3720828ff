//! Configuration structs for the flagfig demo application.
//!
//! A small training setup: a top-level optimizer name and switch, plus two
//! nested sections that both have a `batch_size`. The nested sections show
//! how identical keys at different depths get distinct flags:
//!
//! | Config key         | Flag                           |
//! |--------------------|--------------------------------|
//! | `optim`            | `--optim <STR>`                |
//! | `bool_value`       | `--bool-value` / `--no-bool-value` |
//! | `train.batch_size` | `--train-batch-size <INT>`     |
//! | `val.batch_size`   | `--val-batch-size <INT>`       |
//! | `val.limit`        | `--val-limit <INT>` (unset by default) |

use confique::Config;
use flagfig::{FieldShape, Schema};
use serde::{Deserialize, Serialize};

/// Root configuration for the demo application.
#[derive(Config, Serialize, Deserialize, Debug)]
pub struct Options {
    /// Optimizer name.
    #[config(default = "sgd")]
    pub optim: String,

    /// Example boolean switch.
    #[config(default = true)]
    pub bool_value: bool,

    /// Training settings.
    #[config(nested)]
    pub train: Train,

    /// Validation settings.
    #[config(nested)]
    pub val: Val,
}

#[derive(Config, Serialize, Deserialize, Debug)]
pub struct Train {
    /// Samples per training step.
    #[config(default = 4)]
    pub batch_size: u32,

    /// Learning rate.
    #[config(default = 0.01)]
    pub lr: f64,
}

#[derive(Config, Serialize, Deserialize, Debug)]
pub struct Val {
    /// Samples per validation step.
    #[config(default = 8)]
    pub batch_size: u32,

    /// Stop after this many validation batches.
    pub limit: Option<u32>,
}

impl Schema for Options {
    fn fields() -> Vec<FieldShape> {
        vec![
            FieldShape::of::<String>("optim"),
            FieldShape::of::<bool>("bool_value"),
            FieldShape::nested::<Train>("train"),
            FieldShape::nested::<Val>("val"),
        ]
    }
}

impl Schema for Train {
    fn fields() -> Vec<FieldShape> {
        vec![
            FieldShape::of::<u32>("batch_size"),
            FieldShape::of::<f64>("lr"),
        ]
    }
}

impl Schema for Val {
    fn fields() -> Vec<FieldShape> {
        vec![
            FieldShape::of::<u32>("batch_size"),
            FieldShape::of::<Option<u32>>("limit"),
        ]
    }
}
