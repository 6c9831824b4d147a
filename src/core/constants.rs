/// Well-known name of the bundled property resource.
pub const PROPERTIES_RESOURCE: &str = "config.properties";

// environment
pub const ENV_USER_NAME: &str = "GNIP_USER_NAME";
pub const ENV_USER_PASSWORD: &str = "GNIP_USER_PASSWORD";
pub const ENV_KINESIS_STREAM_NAME: &str = "AWS_KINESIS_STREAM_NAME";
pub const ENV_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const ENV_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";

// property keys
pub const KEY_STREAM_LABEL: &str = "gnip.stream.label";
pub const KEY_ACCOUNT_NAME: &str = "gnip.account.name";
pub const KEY_PRODUCT: &str = "gnip.product";
pub const KEY_CLIENT_ID: &str = "gnip.client.id";
pub const KEY_PUBLISHER: &str = "gnip.publisher";
pub const KEY_PRODUCER_THREAD_COUNT: &str = "producer.thread.count";
pub const KEY_RATE_LIMIT: &str = "rate.limit";
pub const KEY_REPORT_INTERVAL_SECONDS: &str = "metric.report.interval.seconds";
pub const KEY_SHARD_COUNT: &str = "aws.kinesis.shard.count";
pub const KEY_MESSAGE_QUEUE_SIZE: &str = "message.queue.size";

// tunables
pub const DEFAULT_PUBLISHER: &str = "twitter";
pub const DEFAULT_PRODUCER_THREAD_COUNT: i32 = 30;
/// Negative rate limit means "unlimited".
pub const DEFAULT_RATE_LIMIT: f64 = -1.0;
pub const DEFAULT_REPORT_INTERVAL_SECONDS: i32 = 60;
