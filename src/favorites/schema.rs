diesel::table! {
    teams (id) {
        id -> BigInt,
        team_name -> Text,
    }
}
