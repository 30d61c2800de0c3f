//! Static filter tables, keyed by plugin. Values pass straight through to query strings.

use super::{opt, FilterDef, FilterKind, FilterOption, FilterSet};
use crate::plugins::PluginId;

/// Filter declaration for `id`. Plugins without listing filters get an empty set.
pub fn filter_set(id: PluginId) -> FilterSet {
    match id {
        PluginId::DarkStarTranslations => darkstar(),
        PluginId::KariStudio => karistudio(),
        PluginId::NightStudio => nightstudio(),
        PluginId::KatReadingCafe => katreadingcafe(),
        PluginId::MyNovels => FilterSet::default(),
        PluginId::MzNovels => mznovels(),
    }
}

fn picker(
    key: &'static str,
    label: &'static str,
    options: &'static [FilterOption],
    default: &'static str,
) -> FilterDef {
    FilterDef {
        key,
        label,
        kind: FilterKind::Picker { options, default },
    }
}

fn checkboxes(key: &'static str, label: &'static str, options: &'static [FilterOption]) -> FilterDef {
    FilterDef {
        key,
        label,
        kind: FilterKind::CheckboxGroup {
            options,
            default: &[],
        },
    }
}

fn excludable(key: &'static str, label: &'static str, options: &'static [FilterOption]) -> FilterDef {
    FilterDef {
        key,
        label,
        kind: FilterKind::ExcludableCheckboxGroup { options },
    }
}

// DarkStar Translations

const DARKSTAR_SORT: &[FilterOption] = &[
    opt("Recently Updated", "updated|desc"),
    opt("A-Z", "title|asc"),
    opt("Z-A", "title|desc"),
    opt("Newest", "new|desc"),
    opt("Oldest", "new|asc"),
];

const DARKSTAR_GENRES: &[FilterOption] = &[
    opt("Action", "action"),
    opt("Adult", "adult"),
    opt("Adventure", "adventure"),
    opt("Comedy", "comedy"),
    opt("Drama", "drama"),
    opt("Ecchi", "ecchi"),
    opt("Fantasy", "fantasy"),
    opt("Gender Bender", "gender-bender"),
    opt("Harem", "harem"),
    opt("Historical", "historical"),
    opt("Horror", "horror"),
    opt("Josei", "josei"),
    opt("Martial Arts", "martial-arts"),
    opt("Mature", "mature"),
    opt("Mecha", "mecha"),
    opt("Mystery", "mystery"),
    opt("Psychological", "psychological"),
    opt("Romance", "romance"),
    opt("School Life", "school-life"),
    opt("Sci-fi", "sci-fi"),
    opt("Seinen", "seinen"),
    opt("Shoujo", "shoujo"),
    opt("Shoujo Ai", "shoujo-ai"),
    opt("Shounen", "shounen"),
    opt("Shounen Ai", "shounen-ai"),
    opt("Slice of Life", "slice-of-life"),
    opt("Smut", "smut"),
    opt("Sports", "sports"),
    opt("Supernatural", "supernatural"),
    opt("Tragedy", "tragedy"),
    opt("Wuxia", "wuxia"),
    opt("Xianxia", "xianxia"),
    opt("Xuanhuan", "xuanhuan"),
    opt("Yaoi", "yaoi"),
    opt("Yuri", "yuri"),
];

const DARKSTAR_TAGS: &[FilterOption] = &[
    opt("Academy", "academy"),
    opt("Cultivation", "cultivation"),
    opt("Reincarnation", "reincarnation"),
    opt("Transmigration", "transmigration"),
    opt("System", "game-elements"),
    opt("Weak to Strong", "weak-to-strong"),
    opt("Overpowered Protagonist", "overpowered-protagonist"),
    opt("Male Protagonist", "male-protagonist"),
    opt("Female Protagonist", "female-protagonist"),
    opt("Villainess", "villainess-noble-girls"),
];

fn darkstar() -> FilterSet {
    FilterSet(vec![
        picker("sortBy", "Sort By", DARKSTAR_SORT, "updated|desc"),
        checkboxes("genres", "Genres", DARKSTAR_GENRES),
        checkboxes("tags", "Tags", DARKSTAR_TAGS),
    ])
}

// Kari Studio / Night Studio share the listing theme.

const STUDIO_ORDER: &[FilterOption] = &[
    opt("Default", ""),
    opt("Popularity", "popularity"),
    opt("Newest", "date_desc"),
    opt("Oldest", "date_asc"),
    opt("Title A-Z", "title_asc"),
    opt("Title Z-A", "title_desc"),
    opt("Ranking - Best", "ranking-best"),
    opt("Ranking - Popularity", "ranking-popularity"),
    opt("Ranking - Monthly", "ranking-monthly"),
    opt("Ranking - Rising", "ranking-new"),
    opt("Ranking - Completed", "ranking-completed"),
];

const STUDIO_STATUS: &[FilterOption] = &[
    opt("All", ""),
    opt("Active", "Active"),
    opt("Completed", "Completed"),
    opt("On Hold", "On Hold"),
    opt("Dropped", "Dropped"),
];

const KARI_TYPE: &[FilterOption] = &[
    opt("All", ""),
    opt("Translation", "Translation"),
    opt("Original", "Original"),
];

const KARI_LANGUAGE: &[FilterOption] = &[
    opt("All", ""),
    opt("Korean", "Korean"),
    opt("Japanese", "Japanese"),
    opt("Chinese", "Chinese"),
];

const KARI_TAGS: &[FilterOption] = &[
    opt("All", ""),
    opt("18+", "18"),
    opt("Academy Life", "academy-life"),
    opt("Action", "action"),
    opt("Alternate History", "history"),
    opt("Animal MC", "animal-reincarnation"),
    opt("Animal/Monster Girls", "animal-monster-girls"),
    opt("Apocalypse", "apocalypse"),
    opt("Back in Time", "back-in-time"),
    opt("Back to Earth", "back-to-earth"),
    opt("Betrayal", "betrayal"),
    opt("BL", "bl"),
    opt("Celebrity", "celebrity"),
    opt("Chaebol", "chaebol"),
    opt("Childhood Friend", "childhood-friend"),
    opt("Constellation", "constellation"),
    opt("Court", "court"),
    opt("Cyberpunk/Dystopia", "cyberpunk"),
    opt("Demon King", "demon-king"),
    opt("Dungeon and Bosses", "fantasy_boss"),
    opt("Evil Organization", "evil-organization"),
    opt("fantasy", "fantasy"),
    opt("Farming", "farming"),
    opt("Gacha Game", "gacha-game"),
    opt("Game World", "game-world"),
    opt("Gaming", "gaming"),
    opt("Gender Bender(TS)", "gender-benderts"),
    opt("Harem", "harem"),
    opt("Healing", "healing"),
    opt("Hero Party", "hero-party"),
    opt("Heroes and Villains", "heroes-and-villains"),
    opt("Hunters and Gates", "hunters-and-gates"),
    opt("Isekai", "isekai"),
    opt("Knight", "knight"),
    opt("Lily", "lily"),
    opt("Magical Girl", "magical-girl"),
    opt("Martial Arts", "martial-arts"),
    opt("Master/Slave", "master-slave"),
    opt("Medieval Romance", "medieval-romance"),
    opt("Misunderstandings", "misunderstandings"),
    opt("Mystery", "mystery"),
    opt("New World", "new-world"),
    opt("NPC", "npc"),
    opt("Obsessive Love", "obsessive-love"),
    opt("Omegaverse", "omegaverse"),
    opt("Otome Game", "otome-game"),
    opt("Parenting", "parenting"),
    opt("Reversed Gender", "reversed-gender"),
    opt("Robots and AI", "robots-and-ai"),
    opt("Romance", "romance"),
    opt("Romcom", "romcom"),
    opt("Saint", "saint"),
    opt("Sci-fi", "sci-fi"),
    opt("Sister", "sister"),
    opt("Slice of Life", "slice-of-life"),
    opt("Streamer", "streamer"),
    opt("Teacher/Master", "teacher"),
    opt("Urban Fantasy", "urban-fantasy"),
    opt("Villain and Final Boss", "villain-and-final-boss"),
    opt("Villainess", "villainess"),
    opt("Virtual Reality", "virtual-reality"),
];

const NIGHT_TAGS: &[FilterOption] = &[
    opt("All", ""),
    opt("Animal", "animal"),
    opt("Comedy", "comedy"),
    opt("Cooking", "cooking"),
    opt("Court Drama", "court-drama"),
    opt("Engagement/Marriage", "forced-marriage"),
    opt("Farming", "farming"),
    opt("Romance", "romance"),
    opt("Sci-fi", "sci-fi"),
    opt("Slice of Life", "slice-of-life"),
    opt("Supernatural", "supernatural"),
    opt("System", "system"),
    opt("Villainess", "villainess"),
    opt("Wealthy CEO", "wealthy-ceo"),
];

fn karistudio() -> FilterSet {
    FilterSet(vec![
        picker("order", "Sort by", STUDIO_ORDER, ""),
        picker("type", "Type", KARI_TYPE, ""),
        picker("language", "Language", KARI_LANGUAGE, ""),
        picker("status", "Status", STUDIO_STATUS, ""),
        picker("tag", "Theme", KARI_TAGS, ""),
    ])
}

fn nightstudio() -> FilterSet {
    FilterSet(vec![
        picker("order", "Sort by", STUDIO_ORDER, ""),
        picker("status", "Status", STUDIO_STATUS, ""),
        picker("tag", "Theme", NIGHT_TAGS, ""),
    ])
}

// Kat Reading Cafe

const KAT_ORDER: &[FilterOption] = &[
    opt("Default", ""),
    opt("A-Z", "title"),
    opt("Z-A", "titlereverse"),
    opt("Latest Update", "update"),
    opt("Latest Added", "latest"),
    opt("Popular", "popular"),
    opt("Rating", "rating"),
];

const KAT_STATUS: &[FilterOption] = &[
    opt("All", ""),
    opt("Ongoing", "ongoing"),
    opt("Hiatus", "hiatus"),
    opt("Completed", "completed"),
];

const KAT_TYPE: &[FilterOption] = &[
    opt("Fan Fiction", "fan-fiction"),
    opt("Web Novel", "web-novel"),
    opt("WIP", "wip"),
];

const KAT_GENRES: &[FilterOption] = &[
    opt("Action", "action"),
    opt("Adult", "adult"),
    opt("Adventure", "adventure"),
    opt("Comedy", "comedy"),
    opt("Drama", "drama"),
    opt("Ecchi", "ecchi"),
    opt("Fantasy", "fantasy"),
    opt("Gender Bender", "gender-bender"),
    opt("Harem", "harem"),
    opt("Historical", "historical"),
    opt("Horror", "horror"),
    opt("Martial Arts", "martial-arts"),
    opt("Mature", "mature"),
    opt("MTL", "mtl"),
    opt("Mystery", "mystery"),
    opt("Psychological", "psychological"),
    opt("Romance", "romance"),
    opt("School Life", "school-life"),
    opt("Sci-fi", "sci-fi"),
    opt("Seinen", "seinen"),
    opt("Shoujo", "shoujo"),
    opt("Shoujo Ai", "shoujo-ai"),
    opt("Slice of Life", "slice-of-life"),
    opt("Smut", "smut"),
    opt("Supernatural", "supernatural"),
    opt("Tragedy", "tragedy"),
    opt("WIP", "wip"),
    opt("Xianxia", "xianxia"),
    opt("Xuanhuan", "xuanhuan"),
    opt("Yuri", "yuri"),
];

fn katreadingcafe() -> FilterSet {
    FilterSet(vec![
        picker("order", "Order by", KAT_ORDER, "popular"),
        picker("status", "Status", KAT_STATUS, ""),
        checkboxes("type", "Type", KAT_TYPE),
        checkboxes("genre", "Genre", KAT_GENRES),
    ])
}

// MzNovels

const MZ_SORT_BY: &[FilterOption] = &[
    opt("Relevance", "relevance"),
    opt("Date Updated", "date"),
    opt("Number of Views", "views"),
    opt("Number of Favorites", "favorites"),
    opt("Number of Bookmarks", "bookmarks"),
];

const MZ_SORT_ORDER: &[FilterOption] = &[opt("Descending", "desc"), opt("Ascending", "asc")];

const MZ_STATUS: &[FilterOption] = &[
    opt("All Statuses", "all"),
    opt("Ongoing Only", "ongoing"),
    opt("Completed Only", "completed"),
];

const MZ_ORIGIN: &[FilterOption] = &[
    opt("All Origins", "all"),
    opt("Original", "original"),
    opt("Fanfiction", "fanfiction"),
];

const LOGIC: &[FilterOption] = &[opt("AND", "AND"), opt("OR", "OR")];

const MZ_GENRES: &[FilterOption] = &[
    opt("Action", "1"),
    opt("Adult", "2"),
    opt("Adventure", "3"),
    opt("Comedy", "4"),
    opt("Doujinshi", "5"),
    opt("Drama", "6"),
    opt("Ecchi", "7"),
    opt("Fantasy", "8"),
    opt("Gender Bender", "9"),
    opt("Harem", "10"),
    opt("Historical", "11"),
    opt("Horror", "12"),
    opt("Isekai", "13"),
    opt("Josei", "14"),
    opt("Martial Arts", "15"),
    opt("Mecha", "16"),
    opt("Mystery", "17"),
    opt("Psychological", "18"),
    opt("Romance", "19"),
    opt("School Life", "20"),
    opt("Sci-fi", "21"),
    opt("Seinen", "22"),
    opt("Shoujo", "23"),
    opt("Shounen", "24"),
    opt("Slice of Life", "25"),
    opt("Smut", "26"),
    opt("Sports", "27"),
    opt("Supernatural", "28"),
    opt("Tragedy", "29"),
    opt("Yaoi", "30"),
    opt("Yuri", "31"),
];

const MZ_TAGS: &[FilterOption] = &[
    opt("Abandoned at Birth", "1"),
    opt("Accidental Pregnancy", "2"),
    opt("Adopted Sibling Love", "3"),
    opt("Age Gap Romance", "4"),
    opt("Alchemy Master", "5"),
    opt("Ancient Artifact", "6"),
    opt("Ancient China", "7"),
    opt("Ancient Curse", "8"),
    opt("Ancient Magician", "9"),
    opt("Amnesia", "10"),
    opt("Angst", "11"),
    opt("Apprentice’s Journey", "12"),
    opt("Arranged Marriage", "13"),
    opt("Awkward Love Confessions", "14"),
    opt("Awakening Powers", "15"),
    opt("Bad Boy with a Heart of Gold", "16"),
    opt("Beast Tamer", "17"),
    opt("Beta Male Lead", "18"),
    opt("Betrayal by Loved Ones", "19"),
    opt("Betrayed Best Friend", "20"),
    opt("Bittersweet Romance", "21"),
    opt("Black-Bellied Protagonist", "22"),
    opt("Blood Cultivator", "23"),
    opt("Bloodline Power", "24"),
    opt("Body Swap", "25"),
    opt("Broken Engagement", "26"),
    opt("Childhood Friends", "27"),
    opt("Childhood Vows", "28"),
    opt("Clones and Duplicates", "29"),
    opt("Cold Beauty", "30"),
    opt("Cold CEO Male Lead", "31"),
    opt("Contract Marriage", "32"),
    opt("Crossdressing Protagonist", "33"),
    opt("Cultivation Furnace", "34"),
    opt("Cultivation to Immortality", "35"),
    opt("Cyberpunk City", "36"),
    opt("Dark Romance", "37"),
    opt("Demon King", "38"),
    opt("Divine Beasts", "39"),
    opt("Divine Intervention", "40"),
    opt("Dystopian Future", "41"),
    opt("Elite Private School", "42"),
    opt("Emotional Healing", "43"),
    opt("Emotional Rollercoaster", "44"),
    opt("Enemy to Lover", "45"),
    opt("Ex-Lovers Reuniting", "46"),
    opt("Exiled Genius Returns", "47"),
    opt("Exiled Kingdom", "48"),
    opt("Face-Slapping Moments", "49"),
    opt("Fake Death", "50"),
    opt("Fake Lovers", "51"),
    opt("Fake Relationship", "52"),
    opt("Family Feud", "53"),
    opt("Family Secret", "54"),
    opt("Fighting Against Fate", "55"),
    opt("Forbidden Desires", "56"),
    opt("Forbidden Knowledge", "57"),
    opt("Forbidden Love", "58"),
    opt("Forbidden Teacher-Student Romance", "59"),
    opt("Friends to Lovers", "60"),
    opt("Friends with Benefits", "61"),
    opt("Game Element Reincarnation", "62"),
    opt("Game Master", "63"),
    opt("Genius Prodigy Child", "64"),
    opt("Genius Protagonist", "65"),
    opt("Gladiator Arenas", "66"),
    opt("Groundhog Day", "67"),
    opt("Hero Falls for Villain", "68"),
    opt("Hero Saves the Day", "69"),
    opt("Hero’s Fall from Grace", "70"),
    opt("Hidden Cultivation", "71"),
    opt("Hidden Identity", "72"),
    opt("Hidden Magical World", "73"),
    opt("Hidden Master", "74"),
    opt("Hidden Weakness", "75"),
    opt("High School Drama", "76"),
    opt("Hopeful Reunion", "77"),
    opt("Heroic Sacrifice", "78"),
    opt("Immortal Lover", "79"),
    opt("Immortal Soul in Mortal Body", "80"),
    opt("Immortality", "81"),
    opt("Imperial Palace Politics", "82"),
    opt("Instant Power Boost", "83"),
    opt("Inter-Sect Marriage", "84"),
    opt("Journey to the West", "85"),
    opt("Jealous Lover", "86"),
    opt("Leaving the Sect", "87"),
    opt("Legendary Hero’s Descendant", "88"),
    opt("Long-Distance Relationship", "89"),
    opt("Long-Lost Love", "90"),
    opt("Lonely Heroine", "91"),
    opt("Lost Civilizations", "92"),
    opt("Lost Memories", "93"),
    opt("Love After Marriage", "94"),
    opt("Love Dodecahedron", "95"),
    opt("Love-Hate Relationship", "96"),
    opt("Love Potion", "97"),
    opt("Love Triangle", "98"),
    opt("Loner Protagonist", "99"),
    opt("Loyal Retainer", "100"),
    opt("Mafia Family", "101"),
    opt("Magic Contract", "102"),
    opt("Male Lead Falls First", "103"),
    opt("Male to female", "104"),
    opt("Married to the Enemy", "105"),
    opt("Martial Arts Genius", "106"),
    opt("Martial Arts Tournament", "107"),
    opt("Memory Loss", "108"),
    opt("Mentor-Student Relationship", "109"),
    opt("Miscommunication", "110"),
    opt("Misunderstood Heroine", "111"),
    opt("Misunderstood Love", "112"),
    opt("Modern Day with Magic", "113"),
    opt("Mysterious Powers Awaken", "114"),
    opt("Mysterious Teacher", "115"),
    opt("Necromancer", "116"),
    opt("NTR", "117"),
    opt("One-Night Stand", "118"),
    opt("OP Protagonist in Secret", "119"),
    opt("OP Protagonist", "120"),
    opt("Overly Affectionate Lover", "121"),
    opt("Overcoming Trauma", "122"),
    opt("Overprotective Brother", "123"),
    opt("Parallel Lives", "124"),
    opt("Parallel Universe", "125"),
    opt("Parent-Child Relationship", "126"),
    opt("Passionate Lovers", "127"),
    opt("Path of Ascension", "128"),
    opt("Phantom Thief", "129"),
    opt("Poor-to-Rich Development", "130"),
    opt("Power Couple", "131"),
    opt("Power Ranking System", "132"),
    opt("Power Surge", "133"),
    opt("Prodigy Protagonist", "134"),
    opt("Prophecy Child", "135"),
    opt("Prophecy Fulfillment", "136"),
    opt("Protective Lover", "137"),
    opt("Protagonist Hiding Strength", "138"),
    opt("Quest for Power", "139"),
    opt("Redemption Arc", "140"),
    opt("Rebirth After Death", "141"),
    opt("Reluctant Romance", "142"),
    opt("Reincarnated Hero", "143"),
    opt("Resurrection after 1000 Years", "144"),
    opt("Revenge Plot", "145"),
    opt("Rich & Famous", "146"),
    opt("Rich Heroine/Poor Protagonist", "147"),
    opt("Rising from Ashes", "148"),
    opt("Rival Siblings in Love", "149"),
    opt("Rival Turned Ally", "150"),
    opt("Royalty Disguised as Commoner", "151"),
    opt("Ruthless Protagonist", "152"),
    opt("Secret Admirer", "153"),
    opt("Secret Crush", "154"),
    opt("Secret Heir", "155"),
    opt("Secret Organizations", "156"),
    opt("Secret Training Arc", "157"),
    opt("Second Chance Romance", "158"),
    opt("Sect Wars", "159"),
    opt("Shamanism", "160"),
    opt("Shapeshifting", "161"),
    opt("Slow Burn Romance", "162"),
    opt("Slow Progression", "163"),
    opt("Small Village Life", "164"),
    opt("Soulmate Mark", "165"),
    opt("Space Opera", "166"),
    opt("Spirit Companion", "167"),
    opt("Steampunk City", "168"),
    opt("Stalker Male Lead", "169"),
    opt("Sudden Inheritance", "170"),
    opt("Summoner", "171"),
    opt("Supernatural Academy", "172"),
    opt("Sword Saint", "173"),
    opt("System Administrator", "174"),
    opt("System Leveling Up", "175"),
    opt("Time Loop", "176"),
    opt("Time Travel", "177"),
    opt("Tomboy", "178"),
    opt("Tower of Trials", "179"),
    opt("Tragic Ending", "180"),
    opt("Tragic Past", "181"),
    opt("Training to Perfection", "182"),
    opt("Tsundere", "183"),
    opt("Underwater World", "184"),
    opt("Unforeseen Betrayal", "185"),
    opt("Unlikely Allies", "186"),
    opt("Unspoken Feelings", "187"),
    opt("Unwanted Marriage", "188"),
    opt("Unsealing Forbidden Power", "189"),
    opt("Underdog Hero", "190"),
    opt("Unexpected Engagement", "191"),
    opt("Virtual Reality Game", "192"),
    opt("Villainess", "193"),
    opt("Villainess Reborn", "194"),
    opt("Yandere", "195"),
    opt("Zombie Apocalypse", "196"),
    opt("Translate", "197"),
    opt("Misunderstood", "198"),
    opt("sub-Romance", "199"),
    opt("Sarcastic male lead", "200"),
    opt("Modern fantasy", "201"),
    opt("Ninja", "202"),
    opt("Magic", "203"),
    opt("Reincarnated", "204"),
    opt("Monster", "205"),
    opt("Beasts", "206"),
    opt("Original Character", "207"),
    opt("R-15", "208"),
    opt("Brainwashing", "209"),
    opt("Psychological BL", "210"),
    opt("psychopath Protagonist", "211"),
    opt("Evil protagonist", "212"),
    opt("psychopath Female lead", "213"),
    opt("Evil Female Lead", "214"),
    opt("Off-screen Sex", "215"),
    opt("Gag Characters", "216"),
    opt("Gag Comedy", "217"),
    opt("Dungeons", "218"),
    opt("Bad End Avoidance", "219"),
    opt("dominated Male Lead", "220"),
    opt("Domination", "221"),
    opt("OP Male Lead", "222"),
    opt("Sexual active male lead", "223"),
    opt("Submissive Female Lead", "224"),
    opt("Threesome", "225"),
    opt("Sex", "226"),
    opt("Humiliation", "227"),
    opt("Submission after Resisting", "228"),
    opt("netorase", "229"),
    opt("Straightening a Lesbian", "230"),
    opt("Reverse Yuri", "231"),
    opt("R-18", "232"),
    opt("Anti-hero Male Lead", "233"),
    opt("Anti-hero", "234"),
    opt("Anti-hero Female Lead", "235"),
    opt("Evil Male Lead", "236"),
    opt("Muscle-Brained Protagonist", "237"),
];

const MZ_STORY_TYPES: &[FilterOption] = &[
    opt("Gore", "1"),
    opt("Sexuality violent", "2"),
    opt("Mature", "3"),
    opt("Strong language", "4"),
];

fn mznovels() -> FilterSet {
    FilterSet(vec![
        picker("sort_by", "Sort By", MZ_SORT_BY, "date"),
        picker("sort_order", "Sort Order", MZ_SORT_ORDER, "desc"),
        picker("status_filter", "Story Status", MZ_STATUS, "all"),
        picker("story_origin", "Story Origin", MZ_ORIGIN, "all"),
        picker("genre_logic", "Genre Logic (for included)", LOGIC, "AND"),
        excludable("genres", "Genres", MZ_GENRES),
        picker("tag_logic", "Tag Logic (for included)", LOGIC, "AND"),
        excludable("tags", "Tags", MZ_TAGS),
        picker("story_type_logic", "Content Logic", LOGIC, "OR"),
        checkboxes("story_types", "Content Warnings", MZ_STORY_TYPES),
    ])
}
