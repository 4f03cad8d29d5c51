// Diesel table definitions. Keep in sync with `BookDbContext::init_schema`.

diesel::table! {
    books (id) {
        id -> BigInt,
        title -> Text,
        authors -> Text,
        languages -> Text,
        text -> Nullable<Text>,
        analysis -> Nullable<Text>,
    }
}
