//! Closed-class German vocabulary with lemma and STTS tag.
//!
//! Articles, pronouns, prepositions, conjunctions, particles, auxiliary and
//! modal verb forms, plus a handful of frequent adverbs. Keys are lowercase.
//! Context-dependent readings (`zu`, `sein`, `ihr`, `der` as relative
//! pronoun, ...) are resolved by the tagger.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Lowercase surface form → (lemma, STTS tag).
pub static CLOSED_CLASS: LazyLock<HashMap<&'static str, (&'static str, &'static str)>> =
    LazyLock::new(|| {
        let mut map = HashMap::new();

        let mut add = |lemma: &'static str, tag: &'static str, forms: &[&'static str]| {
            for form in forms {
                map.insert(*form, (lemma, tag));
            }
        };

        // Articles
        add("der", "ART", &["der", "die", "das", "den", "dem", "des"]);
        add(
            "ein",
            "ART",
            &["ein", "eine", "einen", "einem", "einer", "eines"],
        );

        // Personal and reflexive pronouns
        add("ich", "PPER", &["ich", "mich", "mir", "meiner"]);
        add("du", "PPER", &["du", "dich", "dir", "deiner"]);
        add("er", "PPER", &["er", "ihn", "ihm", "seiner"]);
        add("sie", "PPER", &["sie", "ihnen", "ihrer"]);
        add("es", "PPER", &["es"]);
        add("wir", "PPER", &["wir", "uns"]);
        add("ihr", "PPER", &["ihr", "euch"]);
        add("sich", "PRF", &["sich"]);

        // Possessive determiners
        for base in ["mein", "dein", "sein", "ihr", "unser", "euer"] {
            let forms: &'static [&'static str] = match base {
                "mein" => &["mein", "meine", "meinen", "meinem", "meines"],
                "dein" => &["dein", "deine", "deinen", "deinem", "deines"],
                "sein" => &["seine", "seinen", "seinem", "seines"],
                "ihr" => &["ihre", "ihren", "ihrem", "ihres"],
                "unser" => &["unsere", "unseren", "unserem", "unseres", "unsre"],
                _ => &["eure", "euren", "eurem", "eures"],
            };
            add(base, "PPOSAT", forms);
        }

        // Demonstratives, indefinites, interrogatives
        add(
            "dieser",
            "PDS",
            &["dieser", "diese", "dieses", "diesem", "diesen"],
        );
        add("jener", "PDS", &["jener", "jene", "jenes", "jenem", "jenen"]);
        add("man", "PIS", &["man"]);
        add("jemand", "PIS", &["jemand", "jemanden", "jemandem"]);
        add("niemand", "PIS", &["niemand", "niemanden", "niemandem"]);
        add("etwas", "PIS", &["etwas"]);
        add("nichts", "PIS", &["nichts"]);
        add("alle", "PIS", &["alle", "alles", "allen", "allem"]);
        add("einige", "PIS", &["einige", "einigen", "einiger"]);
        add("viele", "PIS", &["viele", "vielen"]);
        add("jeder", "PIS", &["jeder", "jede", "jedes", "jedem", "jeden"]);
        add("wer", "PWS", &["wer", "wen", "wem", "wessen"]);
        add("was", "PWS", &["was"]);
        add("welcher", "PWAT", &["welcher", "welche", "welches", "welchem", "welchen"]);
        add("wie", "PWAV", &["wie"]);
        add("wo", "PWAV", &["wo"]);
        add("wann", "PWAV", &["wann"]);
        add("warum", "PWAV", &["warum", "wieso", "weshalb"]);

        // Pronominal adverbs
        for form in [
            "darauf", "dabei", "damit", "dafür", "davon", "dazu", "darüber", "darin", "daran",
            "dadurch", "dagegen", "danach", "davor", "deshalb", "deswegen", "trotzdem", "hierbei",
        ] {
            add(form, "PAV", &[form]);
        }

        // Prepositions
        for form in [
            "in", "an", "auf", "aus", "bei", "mit", "nach", "von", "für", "über", "unter", "vor",
            "hinter", "neben", "zwischen", "durch", "gegen", "ohne", "um", "seit", "bis",
            "während", "wegen", "trotz", "ab", "außer", "gegenüber", "entlang",
        ] {
            add(form, "APPR", &[form]);
        }
        add("in", "APPRART", &["im", "ins"]);
        add("an", "APPRART", &["am", "ans"]);
        add("zu", "APPRART", &["zum", "zur"]);
        add("von", "APPRART", &["vom"]);
        add("bei", "APPRART", &["beim"]);
        add("auf", "APPRART", &["aufs"]);

        // Conjunctions
        for form in ["und", "oder", "aber", "denn", "sondern", "sowie", "doch"] {
            add(form, "KON", &[form]);
        }
        for form in [
            "dass", "weil", "wenn", "ob", "obwohl", "da", "bevor", "nachdem", "falls", "sodass",
            "damit", "sobald", "solange", "indem",
        ] {
            add(form, "KOUS", &[form]);
        }
        add("als", "KOKOM", &["als"]);

        // Particles
        add("nicht", "PTKNEG", &["nicht"]);
        add("zu", "PTKZU", &["zu"]);
        add("ja", "PTKANT", &["ja", "nein", "danke", "bitte"]);

        // Auxiliaries
        add(
            "sein",
            "VAFIN",
            &[
                "bin", "bist", "ist", "sind", "seid", "war", "warst", "waren", "wart", "sei",
                "wäre", "wären",
            ],
        );
        add(
            "haben",
            "VAFIN",
            &[
                "habe", "hast", "hat", "habt", "hatte", "hattest", "hatten", "hattet", "hätte",
                "hätten",
            ],
        );
        add(
            "werden",
            "VAFIN",
            &[
                "werde", "wirst", "wird", "werdet", "wurde", "wurdest", "wurden", "würde",
                "würden",
            ],
        );
        add("haben", "VAINF", &["haben"]);
        add("werden", "VAINF", &["werden"]);
        add("sein", "VAPP", &["gewesen"]);
        add("haben", "VAPP", &["gehabt"]);
        add("werden", "VAPP", &["geworden"]);

        // Modals
        add("können", "VMFIN", &["kann", "kannst", "könnt", "konnte", "konnten", "könnte"]);
        add("müssen", "VMFIN", &["muss", "musst", "müsst", "musste", "mussten", "müsste"]);
        add("dürfen", "VMFIN", &["darf", "darfst", "dürft", "durfte", "durften", "dürfte"]);
        add("sollen", "VMFIN", &["soll", "sollst", "sollt", "sollte", "sollten"]);
        add("wollen", "VMFIN", &["will", "willst", "wollt", "wollte", "wollten"]);
        add("mögen", "VMFIN", &["mag", "magst", "mögt", "mochte", "möchte", "möchten"]);
        for form in ["können", "müssen", "dürfen", "sollen", "wollen", "mögen"] {
            add(form, "VMINF", &[form]);
        }

        // Frequent adverbs
        for form in [
            "sehr", "auch", "noch", "schon", "nur", "immer", "oft", "hier", "dort", "dann",
            "jetzt", "heute", "gestern", "morgen", "bald", "sofort", "gern", "gerne", "wieder",
            "sogar", "fast", "kaum", "leider", "vielleicht", "bereits", "zusammen", "allein",
            "nie", "niemals", "manchmal", "oben", "unten", "vorher", "nachher", "danach",
            "ebenfalls", "außerdem", "zudem", "jedoch", "also",
        ] {
            add(form, "ADV", &[form]);
        }

        // Interjections
        add("ach", "ITJ", &["ach", "oh", "au", "hallo", "tja"]);

        map
    });

/// Look up a word (case-insensitive).
pub fn lookup(word: &str) -> Option<(&'static str, &'static str)> {
    CLOSED_CLASS.get(word.to_lowercase().as_str()).copied()
}
