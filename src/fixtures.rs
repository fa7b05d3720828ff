#[cfg(test)]
pub mod test {
    use confique::Config;
    use serde::{Deserialize, Serialize};
    use toml::Table;

    use crate::resolve::serialize_defaults;
    use crate::schema::{FieldShape, Schema, TypeShape};

    /// Serialized `#[config(default)]` values of `C`.
    pub fn defaults_of<C: Schema>() -> Table {
        let config = C::builder().load().unwrap();
        serialize_defaults(&config).unwrap()
    }

    // -- Training options: one string, one bool, two nested sections ------------

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct Options {
        /// Optimizer name.
        #[config(default = "sgd")]
        pub optim: String,

        #[config(default = true)]
        pub bool_value: bool,

        #[config(nested)]
        pub train: Train,

        #[config(nested)]
        pub val: Val,
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct Train {
        #[config(default = 4)]
        pub batch_size: u32,
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct Val {
        #[config(default = 8)]
        pub batch_size: u32,
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
            vec![FieldShape::of::<u32>("batch_size")]
        }
    }

    impl Schema for Val {
        fn fields() -> Vec<FieldShape> {
            vec![FieldShape::of::<u32>("batch_size")]
        }
    }

    // -- Server-style config with optional and float leaves ---------------------

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct TestConfig {
        /// The application host.
        #[config(default = "localhost")]
        pub host: String,

        /// The port number.
        #[config(default = 8080)]
        pub port: u16,

        /// Enable debug mode.
        #[config(default = false)]
        pub debug: bool,

        /// Database settings.
        #[config(nested)]
        pub database: TestDbConfig,
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct TestDbConfig {
        /// Connection string URL.
        pub url: Option<String>,

        /// Connection pool size.
        #[config(default = 5)]
        pub pool_size: usize,

        /// Log every query.
        pub verbose: Option<bool>,

        /// Connect timeout in seconds.
        #[config(default = 2.5)]
        pub timeout_secs: f64,
    }

    impl Schema for TestConfig {
        fn fields() -> Vec<FieldShape> {
            vec![
                FieldShape::of::<String>("host"),
                FieldShape::of::<u16>("port"),
                FieldShape::of::<bool>("debug"),
                FieldShape::nested::<TestDbConfig>("database"),
            ]
        }
    }

    impl Schema for TestDbConfig {
        fn fields() -> Vec<FieldShape> {
            vec![
                FieldShape::of::<Option<String>>("url"),
                FieldShape::of::<usize>("pool_size"),
                FieldShape::of::<Option<bool>>("verbose"),
                FieldShape::of::<f64>("timeout_secs"),
            ]
        }
    }

    // -- Fixture for choice flags ----------------------------------------------

    #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum Mode {
        Fast,
        Slow,
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct EnumConfig {
        #[config(default = "fast")]
        pub mode: Mode,

        #[config(default = 8080)]
        pub port: u16,

        pub fallback: Option<Mode>,
    }

    impl Schema for EnumConfig {
        fn fields() -> Vec<FieldShape> {
            vec![
                FieldShape::choice("mode", &["fast", "slow"]),
                FieldShape::of::<u16>("port"),
                FieldShape::new(
                    "fallback",
                    TypeShape::optional(TypeShape::Choice(&["fast", "slow"])),
                ),
            ]
        }
    }

    // -- Fixtures for rejected schemas ------------------------------------------

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct TagsConfig {
        #[config(default = ["a", "b"])]
        pub tags: Vec<String>,
    }

    impl Schema for TagsConfig {
        fn fields() -> Vec<FieldShape> {
            vec![FieldShape::of::<Vec<String>>("tags")]
        }
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct OptionalNestedConfig {
        pub extra: Option<Train>,
    }

    impl Schema for OptionalNestedConfig {
        fn fields() -> Vec<FieldShape> {
            vec![FieldShape::new(
                "extra",
                TypeShape::optional(TypeShape::nested::<Train>()),
            )]
        }
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct WrongNestedConfig {
        #[config(nested)]
        pub train: Train,
    }

    impl Schema for WrongNestedConfig {
        fn fields() -> Vec<FieldShape> {
            vec![FieldShape::nested::<Val>("train")]
        }
    }

    // -- Fixture for a cyclic shape table --------------------------------------
    //
    // The structs themselves are finite; `CycleInner`'s table wrongly points
    // its `inner` field back at `CycleOuter`.

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct CycleOuter {
        #[config(nested)]
        pub inner: CycleInner,
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct CycleInner {
        #[config(nested)]
        pub inner: CycleLeaf,
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct CycleLeaf {
        #[config(default = 1)]
        pub x: i32,
    }

    impl Schema for CycleOuter {
        fn fields() -> Vec<FieldShape> {
            vec![FieldShape::nested::<CycleInner>("inner")]
        }
    }

    impl Schema for CycleInner {
        fn fields() -> Vec<FieldShape> {
            vec![FieldShape::nested::<CycleOuter>("inner")]
        }
    }

    impl Schema for CycleLeaf {
        fn fields() -> Vec<FieldShape> {
            vec![FieldShape::of::<i32>("x")]
        }
    }

    // -- Fixture for flag name collisions --------------------------------------

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct CollidingConfig {
        #[config(default = 1)]
        pub a_b: u32,

        #[config(nested)]
        pub a: CollidingInner,
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct CollidingInner {
        #[config(default = 2)]
        pub b: u32,
    }

    impl Schema for CollidingConfig {
        fn fields() -> Vec<FieldShape> {
            vec![
                FieldShape::of::<u32>("a_b"),
                FieldShape::nested::<CollidingInner>("a"),
            ]
        }
    }

    impl Schema for CollidingInner {
        fn fields() -> Vec<FieldShape> {
            vec![FieldShape::of::<u32>("b")]
        }
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct HelpConfig {
        #[config(default = false)]
        pub help: bool,
    }

    impl Schema for HelpConfig {
        fn fields() -> Vec<FieldShape> {
            vec![FieldShape::of::<bool>("help")]
        }
    }

    #[test]
    fn fixtures_load_defaults() {
        let config = TestConfig::builder().load().unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8080);
        assert!(!config.debug);
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.pool_size, 5);

        let options = Options::builder().load().unwrap();
        assert_eq!(options.optim, "sgd");
        assert_eq!(options.train.batch_size, 4);
        assert_eq!(options.val.batch_size, 8);
    }
}
