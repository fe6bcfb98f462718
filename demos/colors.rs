use xcc_dlx::{Builder, Heuristic};

// Two primary slots must both be covered, and a secondary "wire" item forces
// whichever two options are chosen to agree on colour:
//     slot1  slot2  | wire
// 1     x           |  red
// 2            x    |  blue
// 3            x    |  red
//
// Covering slot1 only admits option 1 (wire:red). Of the two options left
// for slot2, only option 3 agrees on colour, so the only solution is {1, 3}.

fn main() {
    let mut b = Builder::new();
    b.define_primary_item("slot1").unwrap();
    b.define_primary_item("slot2").unwrap();
    b.define_secondary_item("wire").unwrap();
    b.prepare_options().unwrap();

    b.begin_option().unwrap();
    b.add_item(1).unwrap();
    b.add_item_with_color(3, "red").unwrap();
    b.end_option().unwrap();

    b.begin_option().unwrap();
    b.add_item(2).unwrap();
    b.add_item_with_color(3, "blue").unwrap();
    b.end_option().unwrap();

    b.begin_option().unwrap();
    b.add_item(2).unwrap();
    b.add_item_with_color(3, "red").unwrap();
    b.end_option().unwrap();

    b.end_options().unwrap();

    let mut driver = b.build(Heuristic::Naive).unwrap();
    let solution = driver.next_solution().unwrap().expect("a solution exists");
    for row in solution.rows(driver.arena()) {
        let rendered: Vec<String> = row
            .into_iter()
            .map(|(name, color)| match color {
                Some(c) => format!("{name}:{c}"),
                None => name,
            })
            .collect();
        println!("{}", rendered.join(" "));
    }
}
