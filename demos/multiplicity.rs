use xcc_dlx::arena::ROOT;
use xcc_dlx::ops::TweakLog;
use xcc_dlx::{Builder, Heuristic};

// `tweak`/`untweak` (Knuth TAOCP 7.2.2.1, answer to exercise 166) forbid a
// single option row without covering its item header, unlike `cover`, which
// removes the header from the active ring entirely. This demo shows the
// round trip directly against the primitive, since the default search
// driver doesn't call it (see DESIGN.md).

fn main() {
    let mut b = Builder::new();
    b.define_primary_item("a").unwrap();
    b.define_primary_item("b").unwrap();
    b.prepare_options().unwrap();
    b.begin_option().unwrap();
    b.add_item(1).unwrap();
    b.end_option().unwrap();
    b.begin_option().unwrap();
    b.add_item(1).unwrap();
    b.add_item(2).unwrap();
    b.end_option().unwrap();
    b.end_options().unwrap();

    let mut driver = b.build(Heuristic::Naive).unwrap();
    let mut log = TweakLog::new();

    let item = driver.arena().rlink(ROOT);
    let row = driver.arena().dlink(item);
    println!("before tweak: len(a) = {}", driver.arena().len(item));

    {
        let arena = driver.arena_mut();
        log.tweak(arena, 0, row, row);
    }
    println!("after tweak:  len(a) = {}", driver.arena().len(item));

    {
        let arena = driver.arena_mut();
        log.untweak(arena, 0);
    }
    println!("after untweak: len(a) = {}", driver.arena().len(item));
}
