use std::{error::Error, io::Cursor};

use diesel::{
    pg::Pg, sql_types::{Integer, Numeric, Text}, Connection, ExpressionMethods, PgConnection,
    QueryDsl, RunQueryDsl
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use once_cell::sync::Lazy;
use pizzastore::{
    configuration::{DatabaseSettings, Settings},
    console::Console,
    dispatcher,
    executor::QueryExecutor,
    models::{MenuItem, NewUser},
    schema::{foodorder, items, itemsinorder, users},
    telemetry::{get_subscriber, init_subscriber}
};
use rust_decimal::Decimal;
use uuid::Uuid;

static LOGGER_INSTANCE: Lazy<()> = Lazy::new(|| {
    let log_level = "info".to_string();
    let name = "pizzastore-test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name, log_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(name, log_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

fn run_migrations(connection: &mut impl MigrationHarness<Pg>)
    -> Result<(), Box<dyn Error + Send + Sync + 'static>>
{
    connection.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

pub struct ScriptOutput{
    pub stdout: String,
    pub stderr: String
}

pub struct TestApp{
    pub database: DatabaseSettings,
    pub executor: QueryExecutor
}

impl TestApp{
    fn create_db(settings: &DatabaseSettings){
        let mut connection = PgConnection::establish(&settings.maintenance_url())
                                .expect("Failed to connect to postgres database");

        let query = format!(r#"CREATE DATABASE "{}";"#, settings.name);
        diesel::sql_query(query)
            .execute(&mut connection)
            .expect("Failed to create test database");

        let mut conn = PgConnection::establish(&settings.connection_url())
                        .expect("Failed to connect to test database");
        run_migrations(&mut conn).expect("Failed to run migrations");
    }

    pub fn spawn_app() -> TestApp{
        Lazy::force(&LOGGER_INSTANCE);

        let mut settings = Settings::get().expect("Failed to read configuration");
        settings.database.name = Uuid::new_v4().to_string();

        TestApp::create_db(&settings.database);

        let executor = QueryExecutor::connect(&settings.database)
                        .expect("Failed to connect to test database");

        TestApp{
            database: settings.database,
            executor
        }
    }

    // A second, independent client of the same database
    pub fn connect(&self) -> QueryExecutor{
        QueryExecutor::connect(&self.database).expect("Failed to open another connection")
    }

    // Feeds `lines` to the menus as standard input; the script ending closes input
    pub fn run_script(&mut self, lines: &[&str]) -> ScriptOutput{
        let mut script = lines.join("\n");
        script.push('\n');

        let mut input = Cursor::new(script.into_bytes());
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        {
            let mut console = Console::new(&mut input, &mut stdout, &mut stderr);
            dispatcher::run(&mut self.executor, &mut console).expect("Console failed");
        }

        ScriptOutput{
            stdout: String::from_utf8(stdout).unwrap(),
            stderr: String::from_utf8(stderr).unwrap()
        }
    }

    pub fn conn(&mut self) -> &mut PgConnection{
        self.executor.connection()
    }

    pub fn add_user(&mut self, login: &str, password: &str, role: &str){
        let user = NewUser{
            login: login.to_string(),
            password: password.to_string(),
            role: role.to_string(),
            favoriteitems: None,
            phonenum: Some("951-555-0100".to_string())
        };

        diesel::insert_into(users::table)
            .values(&user)
            .execute(self.conn())
            .expect("Failed to insert user");
    }

    pub fn add_store(&mut self, store_id: i32, review_score: &str){
        diesel::sql_query(
            "INSERT INTO Store (storeID, address, city, state, isOpen, reviewScore) \
             VALUES ($1, '900 University Ave', 'Riverside', 'CA', 'yes', $2::NUMERIC)"
        )
        .bind::<Integer, _>(store_id)
        .bind::<Text, _>(review_score)
        .execute(self.conn())
        .expect("Failed to insert store");
    }

    pub fn add_item(&mut self, name: &str, item_type: &str, price: &str){
        let item = MenuItem{
            itemname: name.to_string(),
            ingredients: Some("dough,cheese".to_string()),
            typeofitem: Some(item_type.to_string()),
            price: price.parse::<Decimal>().expect("Invalid test price"),
            description: None
        };

        diesel::insert_into(items::table)
            .values(&item)
            .execute(self.conn())
            .expect("Failed to insert item");
    }

    // Inserts an order header plus one line, bypassing the menus
    pub fn add_order(&mut self, order_id: i32, login: &str, store_id: i32, item: &str, quantity: i32){
        diesel::sql_query(
            "INSERT INTO FoodOrder (orderID, login, storeID, totalPrice, orderStatus) \
             VALUES ($1, $2, $3, $4, 'Pending')"
        )
        .bind::<Integer, _>(order_id)
        .bind::<Text, _>(login)
        .bind::<Integer, _>(store_id)
        .bind::<Numeric, _>(Decimal::new(1000, 2))
        .execute(self.conn())
        .expect("Failed to insert order");

        diesel::sql_query("INSERT INTO ItemsInOrder (orderID, itemName, quantity) VALUES ($1, $2, $3)")
            .bind::<Integer, _>(order_id)
            .bind::<Text, _>(item)
            .bind::<Integer, _>(quantity)
            .execute(self.conn())
            .expect("Failed to insert order line");
    }

    pub fn user_count(&mut self) -> i64{
        users::table.count().get_result(self.conn()).unwrap()
    }

    pub fn user_row(&mut self, login: &str) -> (String, String, Option<String>, Option<String>){
        users::table
            .filter(users::login.eq(login))
            .select((users::password, users::role, users::phonenum, users::favoriteitems))
            .first(self.conn())
            .unwrap()
    }

    pub fn order_ids(&mut self) -> Vec<i32>{
        foodorder::table
            .select(foodorder::orderid)
            .order(foodorder::orderid.asc())
            .load(self.conn())
            .unwrap()
    }

    pub fn order_line_count(&mut self) -> i64{
        itemsinorder::table.count().get_result(self.conn()).unwrap()
    }

    pub fn item_price(&mut self, name: &str) -> Option<Decimal>{
        items::table
            .filter(items::itemname.eq(name))
            .select(items::price)
            .first(self.conn())
            .ok()
    }
}

// Menu input that logs `login` in from the main menu
pub fn log_in<'a>(login: &'a str, password: &'a str) -> Vec<&'a str>{
    vec!["2", login, password]
}
