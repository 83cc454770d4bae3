use sop_bdd::bdd::{Bdd, BddConfig, LeafPolicy};
use sop_bdd::order::VarOrder;
use sop_bdd::types::Var;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let bdd = Bdd::build("AB+!C", "ABC")?;
    println!("bdd = {:?}", bdd);

    let root = bdd.root().ok_or_else(|| color_eyre::eyre::eyre!("no root"))?;
    println!("f = {}", bdd.to_bracket_string(root));
    println!("size = {}, allocated = {}", bdd.size(), bdd.num_nodes());
    for input in ["000", "101", "110"] {
        println!("f({}) = {}", input, bdd.evaluate(input)? as u8);
    }
    println!("{}", bdd.debug_string());
    bdd.release();

    // Building by hand through the factory
    let config = BddConfig::default().with_leaf_policy(LeafPolicy::Shared);
    let bdd = Bdd::with_config(VarOrder::parse("AB")?, &config)?;
    let a = bdd.mk_var(Var::new(0))?;
    let b = bdd.mk_var(Var::new(1))?;
    let f = bdd.apply_or(a, b)?;
    bdd.release_node(a);
    bdd.release_node(b);
    bdd.set_root(f);
    println!("a + b = {}", bdd.to_bracket_string(f));
    println!("{}", bdd.to_dot()?);
    bdd.release();

    Ok(())
}
