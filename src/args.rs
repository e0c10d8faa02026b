use clap::{Args as ClapArgs, Parser, Subcommand};
use mockallan_client::Validator;

#[derive(Parser, Debug)]
#[command(version, about = "Query a mockallan mock server from the shell", long_about = None)]
pub struct Args {
    /// mock server base URL
    #[arg(short, long, env = "MOCKALLAN_BASE_URL", default_value = "http://127.0.0.1:8080")]
    pub(crate) base_url: String,

    /// control request timeout (seconds)
    #[arg(short, long, env = "MOCKALLAN_TIMEOUT", default_value_t = 20.0)]
    pub(crate) timeout: f64,

    /// debug logging
    #[arg(short, long, default_value_t = false)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// at least one matching call was recorded
    AssertCalled(Endpoint),
    /// exactly one matching call was recorded
    AssertCalledOnce(Endpoint),
    /// a matching call carried the expected body
    AssertCalledWith(EndpointWithBody),
    /// exactly one matching call carried the expected body
    AssertCalledOnceWith(EndpointWithBody),
    /// replace the stub configuration with a JSON document
    Config {
        /// path to the configuration file, `-` for stdin
        file: String,
    },
    /// print the body of the last recorded call
    CallArgs,
    /// print every recorded call as JSON
    CallArgsList,
    /// print the number of recorded calls
    CallCount,
    /// send a request the way the SUT would and print the response
    Request {
        /// request method
        method: String,
        /// request path
        path: String,
        #[command(flatten)]
        body: BodyArgs,
        /// header as `name: value`, repeatable
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },
}

#[derive(ClapArgs, Debug)]
pub struct Endpoint {
    /// recorded request method
    pub(crate) method: String,
    /// recorded request path
    pub(crate) path: String,
}

#[derive(ClapArgs, Debug)]
pub struct EndpointWithBody {
    #[command(flatten)]
    pub(crate) endpoint: Endpoint,

    #[command(flatten)]
    pub(crate) body: BodyArgs,

    /// content type of the expected body
    #[arg(short, long)]
    pub(crate) content_type: Option<String>,

    /// server side validator: json, jsonschema or regex
    #[arg(long)]
    pub(crate) validator: Option<Validator>,
}

#[derive(ClapArgs, Debug)]
#[group(multiple = false)]
pub struct BodyArgs {
    /// json body
    #[arg(short, long)]
    pub(crate) json: Option<String>,

    /// raw body
    #[arg(short, long)]
    pub(crate) data: Option<String>,
}
