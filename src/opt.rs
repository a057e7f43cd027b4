use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "xsshunter",
    about = "Single-target parameter discovery and reflected XSS probing"
)]
pub struct Opt {
    #[structopt(help = "Target host or URL (prompted for when omitted)")]
    pub target: Option<String>,

    #[structopt(
        short,
        long,
        default_value = "./Active_Targets",
        help = "Root directory for scan workspaces"
    )]
    pub output: String,

    #[structopt(short, long, help = "Activates verbose mode")]
    pub verbose: bool,
}
