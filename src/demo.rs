use anyhow::{ensure, Context};
use log::info;

use singly_linked_list::List;

type Result<T> = anyhow::Result<T>;

fn head_and_tail() -> Result<()> {
    let mut list = List::new();
    list.push_head(1);
    list.push_tail(2);
    info!("pushed 1 at the head and 2 at the tail: {:?}", list);
    ensure!(list.len() == 2, "expected length 2, got {}", list.len());

    let head = list.try_pop_head().context("popping the head")?;
    ensure!(head == 1, "expected 1 at the head, got {}", head);
    info!("pop_head -> {}, remaining {:?}", head, list);

    let tail = list.try_pop_tail().context("popping the tail")?;
    ensure!(tail == 2, "expected 2 at the tail, got {}", tail);
    info!("pop_tail -> {}, remaining {:?}", tail, list);

    ensure!(list.pop_head().is_none(), "list should be empty");
    info!("pop_head on the empty list -> None");
    Ok(())
}

fn tail_removal() -> Result<()> {
    let mut list: List<i32> = (1..=5).collect();
    info!("built {:?}, length {}", list, list.len());

    for expected in [5, 4] {
        let tail = list.try_pop_tail()?;
        ensure!(tail == expected, "expected {} at the tail, got {}", expected, tail);
        info!("pop_tail -> {}", tail);
    }

    let mut rest = Vec::new();
    while let Some(x) = list.pop_head() {
        rest.push(x);
    }
    ensure!(rest == [1, 2, 3], "unexpected remainder {:?}", rest);
    info!("drained the remainder from the head: {:?}", rest);
    Ok(())
}

fn single_element() -> Result<()> {
    let mut list = List::with_value("seed");
    let head = list.try_pop_head()?;
    info!("pop_head on a single element list -> {:?}", head);
    ensure!(list.is_empty(), "list should be empty after popping its only value");
    ensure!(list.pop_tail().is_none(), "tail must be gone with the head");
    info!("pop_tail afterwards -> None");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    head_and_tail().context("head and tail scenario")?;
    tail_removal().context("tail removal scenario")?;
    single_element().context("single element scenario")?;

    info!("all scenarios passed");
    Ok(())
}
