//! End-to-end tests of the attribute bridge over a fake register window.
//!
//! The window is four plain words on the heap; the bridge cannot tell it
//! apart from device memory, so every show/store path, the sentinel rules
//! and the locking discipline can be exercised on the host.

use std::sync::Arc;
use std::thread;

use spi_ip::SpiModule;

const DATA: usize = 0;
const STATUS: usize = 1;
const CONTROL: usize = 2;
const BAUD: usize = 3;

fn fake_module() -> (SpiModule, usize) {
    let base = Box::into_raw(Box::new([0u32; 4])) as usize;
    let module = unsafe { SpiModule::init_at(base) }.unwrap();
    (module, base)
}

fn peek(base: usize, word: usize) -> u32 {
    unsafe { (base as *const u32).add(word).read_volatile() }
}

fn poke(base: usize, word: usize, value: u32) {
    unsafe { (base as *mut u32).add(word).write_volatile(value) }
}

fn release(module: SpiModule, base: usize) {
    module.shutdown();
    drop(unsafe { Box::from_raw(base as *mut [u32; 4]) });
}

#[test]
fn baudrate_store_and_show() {
    let (module, base) = fake_module();
    let baud = module.attr("baudrate").unwrap();
    assert_eq!(baud.store("115200\n"), 7);
    assert_eq!(peek(base, BAUD), 115200);
    assert_eq!(baud.show(), "115200\n");
    baud.store("0x10");
    assert_eq!(peek(base, BAUD), 16);
    release(module, base);
}

#[test]
fn word_size_is_stored_minus_one() {
    let (module, base) = fake_module();
    let ws = module.attr("word_size").unwrap();
    ws.store("5\n");
    assert_eq!(peek(base, CONTROL) & 0x1f, 4);
    assert_eq!(ws.show(), "5\n");
    release(module, base);
}

#[test]
fn cs_select_touches_only_bits_13_and_14() {
    let (module, base) = fake_module();
    poke(base, CONTROL, 0xdead_beef);
    let before = peek(base, CONTROL);
    module.attr("cs_select").unwrap().store("3\n");
    let after = peek(base, CONTROL);
    assert_eq!((after >> 13) & 0b11, 0b11);
    assert_eq!(after & !(0b11 << 13), before & !(0b11 << 13));
    assert_eq!(module.attr("cs_select").unwrap().show(), "3\n");
    release(module, base);
}

#[test]
fn sibling_fields_survive_each_others_stores() {
    let (module, base) = fake_module();
    module.attr("word_size").unwrap().store("8");
    module.attr("cs_select").unwrap().store("2");
    // Writing one CONTROL field leaves the other's decode unchanged.
    assert_eq!(module.attr("word_size").unwrap().show(), "8\n");
    assert_eq!(module.attr("cs_select").unwrap().show(), "2\n");
    release(module, base);
}

#[test]
fn malformed_store_is_a_silent_no_op() {
    let (module, base) = fake_module();
    poke(base, CONTROL, 0x5a5a_5a5a);
    poke(base, BAUD, 77);
    poke(base, DATA, 11);
    for name in ["baudrate", "word_size", "cs_select", "tx_data"] {
        let attr = module.attr(name).unwrap();
        // The call still reports the whole buffer as consumed.
        assert_eq!(attr.store("not a number\n"), 13);
    }
    assert_eq!(peek(base, CONTROL), 0x5a5a_5a5a);
    assert_eq!(peek(base, BAUD), 77);
    assert_eq!(peek(base, DATA), 11);
    release(module, base);
}

#[test]
fn tx_data_writes_through_but_reads_a_sentinel() {
    let (module, base) = fake_module();
    let tx = module.attr("tx_data").unwrap();
    tx.store("0x2a\n");
    assert_eq!(peek(base, DATA), 42);
    assert_eq!(tx.show(), "NAN\n");
    release(module, base);
}

#[test]
fn rx_data_reports_presence_only() {
    let (module, base) = fake_module();
    let rx = module.attr("rx_data").unwrap();
    poke(base, STATUS, 1 << 2);
    assert_eq!(rx.show(), "-1\n");
    poke(base, STATUS, 0);
    assert_eq!(rx.show(), "Not EMPTY\n");
    // Stores are swallowed without touching anything.
    poke(base, DATA, 99);
    assert_eq!(rx.store("123\n"), 4);
    assert_eq!(peek(base, DATA), 99);
    release(module, base);
}

#[test]
fn concurrent_disjoint_control_fields_both_land() {
    let (module, base) = fake_module();
    let module = Arc::new(module);

    let m1 = module.clone();
    let writer_ws = thread::spawn(move || {
        for i in 0..1000u32 {
            let bits = 1 + (i % 32);
            m1.attr("word_size").unwrap().store(&format!("{}\n", bits));
        }
        m1.attr("word_size").unwrap().store("8\n");
    });
    let m2 = module.clone();
    let writer_cs = thread::spawn(move || {
        for i in 0..1000u32 {
            m2.attr("cs_select").unwrap().store(&format!("{}\n", i % 4));
        }
        m2.attr("cs_select").unwrap().store("3\n");
    });
    writer_ws.join().unwrap();
    writer_cs.join().unwrap();

    // Each writer's final value survives the other's thrashing.
    assert_eq!(module.attr("word_size").unwrap().show(), "8\n");
    assert_eq!(module.attr("cs_select").unwrap().show(), "3\n");
    assert_eq!(peek(base, CONTROL) & 0x1f, 7);
    assert_eq!((peek(base, CONTROL) >> 13) & 0b11, 0b11);

    let module = Arc::try_unwrap(module).ok().expect("threads joined");
    release(module, base);
}

#[test]
fn typed_bridge_and_nodes_see_the_same_registers() {
    let (module, base) = fake_module();
    module.ctl().set_core_enable(true);
    module.attr("word_size").unwrap().store("16\n");
    assert_eq!(peek(base, CONTROL) & (1 << 15), 1 << 15);
    assert_eq!(module.ctl().word_size(), 16);
    module.ctl().set_core_enable(false);
    assert_eq!(module.attr("word_size").unwrap().show(), "16\n");
    release(module, base);
}
