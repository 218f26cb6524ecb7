//! Shared fixture: three houses, two of them joined by one marriage.
//!
//! ```text
//! edwyle
//!   └ rickard + lyarra
//!       ├ eddard + catelyn ─ robb, sansa, arya, bran, rickon
//!       ├ benjen
//!       └ lyanna + rhaegar ─ jon (+ ygritte)
//! aerys + rhaella ─ rhaegar, viserys, daenerys
//! tywin + joanna ─ jaime, cersei (+ robert), tyrion
//!                          └ joffrey, myrcella, tommen
//! ```

#![allow(dead_code)]

use kinship::{Gender, MemberId, MemoryStore};

pub fn id(s: &str) -> MemberId {
    MemberId::from(s)
}

pub fn great_houses() -> MemoryStore {
    use Gender::{Female as F, Male as M};

    let db = MemoryStore::new();
    let add = |key: &str, name: &str, g: Gender| {
        db.add_member(key, name, g).unwrap();
    };
    let marry = |a: &str, b: &str| db.marry(&id(a), &id(b)).unwrap();
    let child = |key: &str, name: &str, g: Gender, parent: &str| {
        db.have_child(key, name, g, &id(parent)).unwrap();
    };

    // Stark
    add("edwyle", "Edwyle Stark", M);
    add("rickard", "Rickard Stark", M);
    db.add_parent(&id("edwyle"), &id("rickard")).unwrap();
    add("lyarra", "Lyarra Stark", F);
    marry("rickard", "lyarra");
    child("eddard", "Eddard Stark", M, "rickard");
    add("catelyn", "Catelyn Stark", F);
    marry("eddard", "catelyn");
    child("robb", "Robb Stark", M, "eddard");
    child("sansa", "Sansa Stark", F, "eddard");
    child("arya", "Arya Stark", F, "eddard");
    child("bran", "Brandon Stark", M, "eddard");
    child("rickon", "Rickon Stark", M, "eddard");
    child("benjen", "Benjen Stark", M, "rickard");
    child("lyanna", "Lyanna Stark", F, "rickard");

    // Targaryen
    add("aerys", "Aerys II Targaryen", M);
    add("rhaella", "Rhaella Targaryen", F);
    marry("aerys", "rhaella");
    child("rhaegar", "Rhaegar Targaryen", M, "rhaella");
    child("viserys", "Viserys Targaryen", M, "rhaella");
    child("daenerys", "Daenerys Targaryen", F, "rhaella");
    marry("lyanna", "rhaegar");
    child("jon", "Jon Snow", M, "lyanna");
    add("ygritte", "Ygritte", F);
    marry("jon", "ygritte");

    // Lannister
    add("tywin", "Tywin Lannister", M);
    add("joanna", "Joanna Lannister", F);
    marry("tywin", "joanna");
    child("jaime", "Jaime Lannister", M, "tywin");
    child("cersei", "Cersei Lannister", F, "tywin");
    child("tyrion", "Tyrion Lannister", M, "tywin");
    add("robert", "Robert Baratheon", M);
    marry("robert", "cersei");
    child("joffrey", "Joffrey Baratheon", M, "robert");
    child("myrcella", "Myrcella Baratheon", F, "robert");
    child("tommen", "Tommen Baratheon", M, "robert");

    db
}
