use lese_core::{Lexicon, LexiconTables};

/// Norwegian Bokmål word tables
pub static BOKMAL: LexiconTables = LexiconTables {
    code: "nb",
    special_letters: &['æ', 'ø', 'å'],
    alphabet: &[
        'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
        't', 'u', 'v', 'w', 'x', 'y', 'z', 'æ', 'ø', 'å',
    ],
    english_stop_words: &[
        "the", "and", "that", "this", "with", "from", "have", "has", "had", "was", "were", "are",
        "been", "being", "for", "not", "but", "you", "your", "they", "them", "their", "there",
        "what", "when", "where", "which", "who", "why", "how", "will", "would", "could", "should",
        "can", "about", "into", "than", "then", "these", "those", "some", "any", "all", "our",
        "out", "just", "also", "very", "here", "only", "like", "does", "did",
    ],
    function_words: &[
        // pronouns
        "jeg", "meg", "min", "mitt", "mine", "deg", "din", "ditt", "dine", "han", "ham", "hans",
        "hun", "henne", "hennes", "den", "det", "vi", "oss", "vår", "vårt", "våre", "dere",
        "deres", "de", "dem", "seg", "sin", "sitt", "sine",
        // determiners
        "en", "ei", "et", "denne", "dette", "disse", "noen", "noe", "ingen", "intet", "alle",
        "hver", "hvert", "begge", "annen", "annet", "andre", "samme",
        // question words
        "hva", "hvem", "hvor", "hvorfor", "hvordan", "hvilken", "hvilket", "hvilke", "når",
        // auxiliaries and high-frequency verbs
        "er", "var", "vært", "har", "hadde", "hatt", "blir", "ble", "blitt", "kan", "kunne",
        "vil", "ville", "skal", "skulle", "må", "måtte", "bør", "burde", "får", "fikk", "liker",
        "likte", "går", "gikk",
        // conjunctions, prepositions and particles
        "og", "eller", "men", "som", "fordi", "hvis", "at", "med", "til", "fra", "for", "om",
        "ikke", "også", "bare", "nå", "der", "her", "da", "så", "over", "under", "etter", "før",
        "mellom", "uten", "mot",
    ],
    common_words: &[
        "hei", "takk", "god", "dag", "hus", "bil", "tid", "mat", "vann", "land", "barn",
        "mann", "kvinne", "venn", "bok", "skole", "jobb", "arbeid", "penger", "hjem", "ord",
        "språk", "norsk", "engelsk", "stor", "liten", "gammel", "fin", "glad", "trist",
        "snakke", "lese", "skrive", "spise", "drikke", "sove", "løpe", "komme", "reise",
    ],
    suffixes: &[
        "en", "er", "et", "ene", "ane", "ing", "ingen", "het", "heten", "lig", "lige", "isk",
        "iske", "ere", "est", "este", "te", "de", "sjon", "sjonen", "else", "dom", "skap",
    ],
    supplementary_words: &[
        "e-post", "t-bane", "tv-en", "pc-en", "wifi", "nei", "kafé", "sms",
    ],
};

/// Normalized lexicon for Bokmål
pub fn bokmal() -> Lexicon {
    Lexicon::from_tables(&BOKMAL)
}
